//! # Durability
//!
//! State written through the file backend survives a restart; damaged
//! snapshots stop the node instead of starting it empty.

use std::fs;

use pc_01_role_registry::{RoleRegistryApi, RoleVerifier};
use pc_02_product_catalog::{ProductCatalogApi, ProductCatalogReader};
use pc_03_milestone_ledger::{MilestoneLedgerApi, MilestoneLedgerReader};
use provenance_node::adapters::{DatabaseLock, LockError, RegistryStores};
use provenance_node::container::{StorageBackend, StorageConfig};
use provenance_node::ProvenanceContainer;
use shared_types::entities::Role;
use shared_types::errors::StorageError;
use tempfile::tempdir;

use super::fixtures::*;

fn file_config(dir: &std::path::Path) -> StorageConfig {
    StorageConfig {
        backend: StorageBackend::File,
        data_dir: dir.to_path_buf(),
    }
}

fn open(dir: &std::path::Path) -> ProvenanceContainer {
    container_over(RegistryStores::open(&file_config(dir)).unwrap())
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempdir().unwrap();

    {
        let c = open(dir.path());
        let p = with_product(&c, "P1");
        c.ledger.add_milestone(&SUPPLIER, p, "Manufactured", "a", NOW - 20).unwrap();
        c.ledger.add_milestone(&SUPPLIER, p, "Shipped", "b", NOW - 10).unwrap();
        c.roles.revoke_verification(&ADMIN, SUPPLIER).unwrap();
    }

    let c = open(dir.path());
    let p = pid("P1");

    assert_eq!(c.roles.participant_count().unwrap(), 3);
    let status = c.roles.get_participant_status(&SUPPLIER).unwrap();
    assert_eq!(status.role, Role::Supplier);
    assert!(!status.verified);

    assert_eq!(c.catalog.get_product_details(&p).unwrap().name, "p1");
    let kinds: Vec<_> = c
        .ledger
        .get_product_milestones(&p)
        .unwrap()
        .into_iter()
        .map(|m| m.milestone_type)
        .collect();
    assert_eq!(kinds, vec!["Manufactured", "Shipped"]);

    // Appends continue from the persisted count.
    c.roles
        .verify_participant(&ADMIN, SUPPLIER, Role::Supplier)
        .unwrap();
    let added = c.ledger.add_milestone(&SUPPLIER, p, "Delivered", "c", NOW).unwrap();
    assert_eq!(added.index, 2);
}

#[test]
fn test_reopen_does_not_rebootstrap_admin() {
    let dir = tempdir().unwrap();
    drop(open(dir.path()));

    let mut config = config();
    let other_admin = [0xBB; 20];
    config.registry.genesis_admin = other_admin;
    let stores = RegistryStores::open(&file_config(dir.path())).unwrap();
    let c = ProvenanceContainer::new(
        config,
        stores,
        std::sync::Arc::new(shared_types::time::ManualTimeSource::new(NOW)),
    )
    .unwrap();

    assert_eq!(c.roles.participant_count().unwrap(), 1);
    assert!(c.roles.is_verified_for_role(&ADMIN, Role::Admin).unwrap());
    assert!(!c.roles.is_verified_for_role(&other_admin, Role::Admin).unwrap());
}

#[test]
fn test_corrupted_snapshot_is_fatal() {
    let dir = tempdir().unwrap();
    {
        let c = open(dir.path());
        with_product(&c, "P1");
    }

    let path = dir.path().join("products.db");
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x5a;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        RegistryStores::open(&file_config(dir.path())),
        Err(StorageError::Corrupted { .. })
    ));
}

#[test]
fn test_second_node_cannot_share_data_dir() {
    let dir = tempdir().unwrap();
    let _first = DatabaseLock::acquire(dir.path()).unwrap();

    assert!(matches!(
        DatabaseLock::acquire(dir.path()),
        Err(LockError::AlreadyLocked { .. })
    ));
}
