//! Shared setup for the integration tests.

use std::sync::Arc;

use pc_01_role_registry::RoleRegistryApi;
use pc_02_product_catalog::ProductCatalogApi;
use provenance_node::adapters::RegistryStores;
use provenance_node::container::{NodeConfig, ProvenanceContainer};
use shared_types::entities::{product_id_from_label, Address, ProductId, Role, Timestamp};
use shared_types::time::ManualTimeSource;

pub const ADMIN: Address = [0xAA; 20];
pub const MAKER: Address = [0x11; 20];
pub const SUPPLIER: Address = [0x22; 20];
pub const OUTSIDER: Address = [0x99; 20];

/// Ledger "now" for every fixture.
pub const NOW: Timestamp = 1_700_000_000;

pub fn pid(label: &str) -> ProductId {
    product_id_from_label(label).unwrap()
}

pub fn config() -> NodeConfig {
    let mut config = NodeConfig::default();
    config.registry.genesis_admin = ADMIN;
    config
}

pub fn container_over(stores: RegistryStores) -> ProvenanceContainer {
    ProvenanceContainer::new(config(), stores, Arc::new(ManualTimeSource::new(NOW))).unwrap()
}

/// In-memory registry with only the genesis admin.
pub fn container() -> ProvenanceContainer {
    container_over(RegistryStores::in_memory())
}

/// Verifies MAKER and SUPPLIER and registers `label`.
pub fn with_product(c: &ProvenanceContainer, label: &str) -> ProductId {
    c.roles
        .verify_participant(&ADMIN, MAKER, Role::Manufacturer)
        .unwrap();
    c.roles
        .verify_participant(&ADMIN, SUPPLIER, Role::Supplier)
        .unwrap();
    let id = pid(label);
    c.catalog
        .register_product(&MAKER, id, &label.to_lowercase(), MAKER)
        .unwrap();
    id
}
