//! # Concurrency
//!
//! Writers race through the shared write gate; readers run alongside and must
//! never see a gap or a half-applied append.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use pc_01_role_registry::RoleRegistryApi;
use pc_02_product_catalog::{ProductCatalogApi, ProductCatalogError};
use pc_03_milestone_ledger::{MilestoneLedgerApi, MilestoneLedgerReader};
use shared_bus::{EventFilter, EventTopic, ProvenanceEvent};
use shared_types::entities::Role;

use super::fixtures::*;

const WRITERS: usize = 8;
const APPENDS_PER_WRITER: usize = 20;

#[test]
fn test_parallel_appends_get_contiguous_indices() {
    let c = Arc::new(container());
    let p = with_product(&c, "P1");
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let c = Arc::clone(&c);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..APPENDS_PER_WRITER)
                    .map(|i| {
                        c.ledger
                            .add_milestone(&SUPPLIER, p, &format!("w{}", w), &i.to_string(), NOW)
                            .unwrap()
                            .index
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut indices: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    indices.sort_unstable();

    let total = (WRITERS * APPENDS_PER_WRITER) as u64;
    assert_eq!(indices, (0..total).collect::<Vec<_>>());
    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), total);

    // Each writer's own milestones keep its submission order.
    let milestones = c.ledger.get_product_milestones(&p).unwrap();
    for w in 0..WRITERS {
        let details: Vec<usize> = milestones
            .iter()
            .filter(|m| m.milestone_type == format!("w{}", w))
            .map(|m| m.details.parse().unwrap())
            .collect();
        assert_eq!(details, (0..APPENDS_PER_WRITER).collect::<Vec<_>>());
    }
}

#[test]
fn test_racing_registrations_yield_one_winner() {
    const RACERS: usize = 8;

    let c = Arc::new(container());
    with_product(&c, "P1");
    let contested = pid("CONTESTED");
    let barrier = Arc::new(Barrier::new(RACERS));

    let results: Vec<_> = (0..RACERS)
        .map(|r| {
            let c = Arc::clone(&c);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                c.catalog
                    .register_product(&MAKER, contested, &format!("racer-{}", r), MAKER)
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results.iter().filter(|r| r.is_err()).all(|r| {
        *r == Err(ProductCatalogError::ProductAlreadyExists { id: contested })
    }));
    assert_eq!(c.catalog.product_count().unwrap(), 2);
}

#[test]
fn test_readers_never_observe_gaps() {
    let c = Arc::new(container());
    let p = with_product(&c, "P1");
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&c);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last_len = 0;
                while !done.load(Ordering::Acquire) {
                    let milestones = c.ledger.get_product_milestones(&p).unwrap();
                    assert!(milestones.len() >= last_len);
                    assert!(milestones
                        .iter()
                        .enumerate()
                        .all(|(i, m)| m.index == i as u64));
                    last_len = milestones.len();
                }
            })
        })
        .collect();

    for i in 0..200 {
        c.ledger
            .add_milestone(&SUPPLIER, p, "tick", &i.to_string(), NOW)
            .unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(c.ledger.get_milestone_count(&p).unwrap(), 200);
}

#[test]
fn test_bus_order_matches_index_order_under_contention() {
    let c = Arc::new(container());
    let p = with_product(&c, "P1");
    let mut events = c.subscribe(EventFilter::topics(vec![EventTopic::Milestones]));

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                for _ in 0..APPENDS_PER_WRITER {
                    c.ledger.add_milestone(&SUPPLIER, p, "x", "y", NOW).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let indices: Vec<u64> = events
        .drain()
        .into_iter()
        .map(|e| match e {
            ProvenanceEvent::MilestoneAdded(added) => added.index,
            other => panic!("unexpected event {}", other),
        })
        .collect();
    let total = (WRITERS * APPENDS_PER_WRITER) as u64;
    assert_eq!(indices, (0..total).collect::<Vec<_>>());
}

#[test]
fn test_role_changes_race_with_appends() {
    let c = Arc::new(container());
    let p = with_product(&c, "P1");

    let toggler = {
        let c = Arc::clone(&c);
        thread::spawn(move || {
            for _ in 0..50 {
                c.roles.revoke_verification(&ADMIN, SUPPLIER).unwrap();
                c.roles
                    .verify_participant(&ADMIN, SUPPLIER, Role::Supplier)
                    .unwrap();
            }
        })
    };

    let mut accepted = HashSet::new();
    for i in 0..100 {
        if let Ok(added) = c.ledger.add_milestone(&SUPPLIER, p, "x", &i.to_string(), NOW) {
            assert!(accepted.insert(added.index));
        }
    }
    toggler.join().unwrap();

    let count = c.ledger.get_milestone_count(&p).unwrap();
    assert_eq!(count, accepted.len() as u64);
    assert!(accepted.iter().all(|&i| i < count));
}
