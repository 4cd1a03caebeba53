//! # Registry Scenarios
//!
//! End-to-end flows through the wired container: role checks, catalog,
//! ledger, facade, and the event bus together.

use pc_01_role_registry::{RoleRegistryApi, RoleRegistryError, RoleVerifier};
use pc_02_product_catalog::{ProductCatalogApi, ProductCatalogError, ProductCatalogReader};
use pc_03_milestone_ledger::{MilestoneLedgerApi, MilestoneLedgerError, MilestoneLedgerReader};
use pc_04_query_facade::{QueryApi, QueryFacadeError};
use shared_bus::{EventFilter, EventTopic, ProvenanceEvent};
use shared_types::entities::Role;
use shared_types::errors::{Classified, ErrorKind};

use super::fixtures::*;

// =============================================================================
// SCENARIO A: happy path
// =============================================================================

#[test]
fn test_scenario_a_three_milestones_in_order() {
    let c = container();
    let p = with_product(&c, "P1");

    for (kind, ts) in [
        ("Manufactured", NOW - 7200),
        ("Packaged", NOW - 3600),
        ("Shipped", NOW - 1800),
    ] {
        c.ledger
            .add_milestone(&SUPPLIER, p, kind, "ok", ts)
            .unwrap();
    }

    let milestones = c.ledger.get_product_milestones(&p).unwrap();
    let kinds: Vec<_> = milestones.iter().map(|m| m.milestone_type.as_str()).collect();
    assert_eq!(kinds, vec!["Manufactured", "Packaged", "Shipped"]);
    assert!(milestones.iter().all(|m| m.participant == SUPPLIER));
    assert!(milestones
        .iter()
        .enumerate()
        .all(|(i, m)| m.index == i as u64 && m.product_id == p));
    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), 3);
}

#[test]
fn test_scenario_a_bus_order_matches_commit_order() {
    let c = container();
    let mut all = c.subscribe(EventFilter::all());
    let mut milestones_only = c.subscribe(EventFilter::topics(vec![EventTopic::Milestones]));

    let p = with_product(&c, "P1");
    c.ledger
        .add_milestone(&SUPPLIER, p, "Manufactured", "a", NOW - 10)
        .unwrap();

    let names: Vec<_> = all.drain().iter().map(ProvenanceEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "ParticipantVerified",
            "ParticipantVerified",
            "ProductRegistered",
            "MilestoneAdded"
        ]
    );

    match milestones_only.drain().as_slice() {
        [ProvenanceEvent::MilestoneAdded(e)] => {
            assert_eq!(e.product_id, p);
            assert_eq!(e.index, 0);
            assert_eq!(e.participant, SUPPLIER);
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[test]
fn test_scenario_a_provenance_through_facade() {
    let c = container();
    let p = with_product(&c, "P1");
    c.ledger
        .add_milestone(&SUPPLIER, p, "Manufactured", "Factory A", NOW - 60)
        .unwrap();
    c.ledger
        .add_milestone(&SUPPLIER, p, "Shipped", "Port B", NOW)
        .unwrap();

    let provenance = c.query.get_product_provenance(&p).unwrap();
    assert_eq!(provenance.product.name, "p1");
    assert_eq!(provenance.product.manufacturer, MAKER);
    assert_eq!(provenance.product.registered_at, NOW);
    assert_eq!(provenance.milestones.len(), 2);
    assert_eq!(provenance.latest().unwrap().details, "Port B");
    assert!(c.query.product_exists(&p).unwrap());
}

// =============================================================================
// SCENARIO B: revocation blocks writes, reverification resumes them
// =============================================================================

#[test]
fn test_scenario_b_revoke_then_reverify_supplier() {
    let c = container();
    let p = with_product(&c, "P1");
    for kind in ["Manufactured", "Packaged", "Shipped"] {
        c.ledger.add_milestone(&SUPPLIER, p, kind, "d", NOW - 100).unwrap();
    }

    c.roles.revoke_verification(&ADMIN, SUPPLIER).unwrap();
    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, p, "Delivered", "d", NOW - 1),
        Err(MilestoneLedgerError::NotVerifiedSupplier { caller: SUPPLIER })
    );
    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), 3);

    // Role survives revocation.
    let status = c.roles.get_participant_status(&SUPPLIER).unwrap();
    assert_eq!(status.role, Role::Supplier);
    assert!(!status.verified);

    c.roles
        .verify_participant(&ADMIN, SUPPLIER, Role::Supplier)
        .unwrap();
    let added = c
        .ledger
        .add_milestone(&SUPPLIER, p, "Delivered", "d", NOW - 1)
        .unwrap();
    assert_eq!(added.index, 3);
    assert_eq!(c.ledger.get_milestone_at_index(&p, 3).unwrap().milestone_type, "Delivered");
}

#[test]
fn test_scenario_b_reverify_with_new_role() {
    let c = container();
    let p = with_product(&c, "P1");

    c.roles.revoke_verification(&ADMIN, SUPPLIER).unwrap();
    c.roles
        .verify_participant(&ADMIN, SUPPLIER, Role::Manufacturer)
        .unwrap();

    assert!(c.roles.is_verified_for_role(&SUPPLIER, Role::Manufacturer).unwrap());
    assert!(!c.roles.is_verified_for_role(&SUPPLIER, Role::Supplier).unwrap());
    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, p, "Shipped", "d", NOW),
        Err(MilestoneLedgerError::NotVerifiedSupplier { caller: SUPPLIER })
    );
    assert!(c
        .catalog
        .register_product(&SUPPLIER, pid("P9"), "n", SUPPLIER)
        .is_ok());
}

// =============================================================================
// SCENARIO C: rejected milestones leave no trace
// =============================================================================

#[test]
fn test_scenario_c_invalid_milestones_do_not_mutate() {
    let c = container();
    let p = with_product(&c, "P1");
    c.ledger.add_milestone(&SUPPLIER, p, "Manufactured", "d", NOW - 5).unwrap();
    let mut events = c.subscribe(EventFilter::all());

    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, p, "X", "Y", NOW + 3600),
        Err(MilestoneLedgerError::InvalidTimestamp {
            timestamp: NOW + 3600,
            now: NOW
        })
    );
    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, p, "", "Y", NOW - 10),
        Err(MilestoneLedgerError::EmptyMilestoneType)
    );
    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, p, "X", "", NOW - 10),
        Err(MilestoneLedgerError::EmptyMilestoneDetails)
    );
    assert_eq!(
        c.ledger.add_milestone(&SUPPLIER, pid("NOPE"), "X", "Y", NOW - 10),
        Err(MilestoneLedgerError::ProductNotFound { id: pid("NOPE") })
    );

    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), 1);
    assert!(events.drain().is_empty());
}

#[test]
fn test_scenario_c_supplier_check_precedes_content_checks() {
    let c = container();
    let p = with_product(&c, "P1");

    let err = c
        .ledger
        .add_milestone(&MAKER, p, "", "", NOW + 1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotVerifiedSupplier);
    assert!(!err.is_fatal());
}

// =============================================================================
// SCENARIO D: duplicate registration
// =============================================================================

#[test]
fn test_scenario_d_duplicate_product_rejected() {
    let c = container();
    with_product(&c, "P1");
    let p2 = pid("P2");

    c.catalog.register_product(&MAKER, p2, "n", MAKER).unwrap();
    assert_eq!(
        c.catalog.register_product(&MAKER, p2, "other", MAKER),
        Err(ProductCatalogError::ProductAlreadyExists { id: p2 })
    );

    let stored = c.catalog.get_product_details(&p2).unwrap();
    assert_eq!(stored.name, "n");
    assert_eq!(c.catalog.product_count().unwrap(), 2);
}

// =============================================================================
// ACCESS CONTROL ACROSS COMPONENTS
// =============================================================================

#[test]
fn test_only_admins_change_roles() {
    let c = container();
    with_product(&c, "P1");

    assert_eq!(
        c.roles.verify_participant(&MAKER, OUTSIDER, Role::Admin),
        Err(RoleRegistryError::AccessDenied { caller: MAKER })
    );
    assert_eq!(
        c.roles.revoke_verification(&OUTSIDER, SUPPLIER),
        Err(RoleRegistryError::AccessDenied { caller: OUTSIDER })
    );
    assert!(c.roles.is_verified_for_role(&SUPPLIER, Role::Supplier).unwrap());
}

#[test]
fn test_unverified_caller_cannot_register() {
    let c = container();
    with_product(&c, "P1");

    assert_eq!(
        c.catalog.register_product(&SUPPLIER, pid("P2"), "n", MAKER),
        Err(ProductCatalogError::NotVerifiedManufacturer { caller: SUPPLIER })
    );
    assert!(!c.catalog.product_exists(&pid("P2")).unwrap());
}

#[test]
fn test_order_ignores_timestamps() {
    let c = container();
    let p = with_product(&c, "P1");

    c.ledger.add_milestone(&SUPPLIER, p, "late", "d", NOW).unwrap();
    c.ledger.add_milestone(&SUPPLIER, p, "early", "d", 1).unwrap();

    let kinds: Vec<_> = c
        .ledger
        .get_product_milestones(&p)
        .unwrap()
        .into_iter()
        .map(|m| m.milestone_type)
        .collect();
    assert_eq!(kinds, vec!["late", "early"]);
}

#[test]
fn test_facade_passes_errors_through() {
    let c = container();

    assert_eq!(
        c.query.get_product_details(&pid("P1")),
        Err(ProductCatalogError::ProductNotFound { id: pid("P1") })
    );
    assert_eq!(
        c.query.get_product_milestones(&pid("P1")),
        Err(MilestoneLedgerError::ProductNotFound { id: pid("P1") })
    );
    let err = c.query.get_product_provenance(&pid("P1")).unwrap_err();
    assert!(matches!(err, QueryFacadeError::Catalog(_)));
    assert_eq!(err.kind(), ErrorKind::ProductNotFound);
}

#[test]
fn test_empty_product_reads() {
    let c = container();
    let p = with_product(&c, "P1");

    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), 0);
    assert!(c.ledger.get_product_milestones(&p).unwrap().is_empty());
    assert_eq!(
        c.ledger.get_milestone_at_index(&p, 0),
        Err(MilestoneLedgerError::IndexOutOfBounds { index: 0, count: 0 })
    );
}

// =============================================================================
// ASYNC SUBSCRIBERS
// =============================================================================

#[tokio::test]
async fn test_async_subscriber_sees_registration() {
    let c = container();
    let mut products = c.subscribe(EventFilter::topics(vec![EventTopic::Products]));
    let p = with_product(&c, "P1");

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), products.recv())
        .await
        .unwrap()
        .unwrap();
    match event {
        ProvenanceEvent::ProductRegistered(e) => {
            assert_eq!(e.product_id, p);
            assert_eq!(e.manufacturer, MAKER);
        }
        other => panic!("unexpected event {}", other),
    }
    assert_eq!(products.try_recv(), Ok(None));
}

// =============================================================================
// PROPERTY: arbitrary interleavings keep the ledger consistent
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Append { offset: i64, empty_type: bool },
    Revoke,
    Reverify,
}

fn op() -> impl proptest::strategy::Strategy<Value = Op> {
    use proptest::prelude::*;
    prop_oneof![
        4 => (-7200i64..3600, any::<bool>())
            .prop_map(|(offset, empty_type)| Op::Append { offset, empty_type }),
        1 => Just(Op::Revoke),
        1 => Just(Op::Reverify),
    ]
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ledger_counts_only_accepted_appends(ops in proptest::collection::vec(op(), 1..40)) {
        let c = container();
        let p = with_product(&c, "P1");
        let mut verified = true;
        let mut accepted = 0u64;

        for op in ops {
            match op {
                Op::Append { offset, empty_type } => {
                    let ts = (NOW as i64 + offset) as u64;
                    let kind = if empty_type { "" } else { "step" };
                    let result = c.ledger.add_milestone(&SUPPLIER, p, kind, "d", ts);
                    let should_accept = verified && !empty_type && ts <= NOW;
                    proptest::prop_assert_eq!(result.is_ok(), should_accept);
                    if let Ok(added) = result {
                        proptest::prop_assert_eq!(added.index, accepted);
                        accepted += 1;
                    }
                }
                Op::Revoke => {
                    let result = c.roles.revoke_verification(&ADMIN, SUPPLIER);
                    proptest::prop_assert_eq!(result.is_ok(), verified);
                    verified = false;
                }
                Op::Reverify => {
                    let result = c.roles.verify_participant(&ADMIN, SUPPLIER, Role::Supplier);
                    proptest::prop_assert_eq!(result.is_ok(), !verified);
                    verified = true;
                }
            }
        }

        proptest::prop_assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), accepted);
        let milestones = c.ledger.get_product_milestones(&p).unwrap();
        proptest::prop_assert!(milestones.iter().enumerate().all(|(i, m)| m.index == i as u64));
    }
}
