//! # Inbound Ports
//!
//! What the milestone ledger offers to the rest of the system.

use crate::domain::{Milestone, MilestoneLedgerError};
use parking_lot::RwLock;
use shared_bus::MilestoneAdded;
use shared_types::entities::{Address, ProductId, Timestamp};
use std::collections::HashMap;

/// Read capability over milestone sequences.
///
/// Every query fails `ProductNotFound` for products unknown to the catalog.
pub trait MilestoneLedgerReader: Send + Sync {
    /// Number of milestones recorded for `id`.
    fn get_milestone_count(&self, id: &ProductId) -> Result<u64, MilestoneLedgerError>;

    /// Milestone at `index`, or `IndexOutOfBounds` when `index >= count`.
    fn get_milestone_at_index(
        &self,
        id: &ProductId,
        index: u64,
    ) -> Result<Milestone, MilestoneLedgerError>;

    /// Full sequence for `id`, unfiltered, in submission order.
    fn get_product_milestones(&self, id: &ProductId)
        -> Result<Vec<Milestone>, MilestoneLedgerError>;
}

/// Milestone Ledger API - inbound port.
pub trait MilestoneLedgerApi: MilestoneLedgerReader {
    /// Append a milestone. Verified suppliers only.
    ///
    /// Check order: `NotVerifiedSupplier`, `ProductNotFound`,
    /// `EmptyMilestoneType`, `EmptyMilestoneDetails`, `InvalidTimestamp`.
    fn add_milestone(
        &self,
        caller: &Address,
        id: ProductId,
        milestone_type: &str,
        details: &str,
        timestamp: Timestamp,
    ) -> Result<MilestoneAdded, MilestoneLedgerError>;
}

// =============================================================================
// Mock Implementation (for downstream tests)
// =============================================================================

/// In-memory ledger reader. Only products passed to `track` are known.
#[derive(Debug, Default)]
pub struct MockMilestoneLedger {
    sequences: RwLock<HashMap<ProductId, Vec<Milestone>>>,
}

impl MockMilestoneLedger {
    /// Creates a ledger that knows no products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `id` known with an empty sequence.
    pub fn track(&self, id: ProductId) {
        self.sequences.write().entry(id).or_default();
    }

    /// Appends a milestone, assigning the next index.
    pub fn push(&self, id: ProductId, milestone_type: &str, details: &str, participant: Address) {
        let mut sequences = self.sequences.write();
        let sequence = sequences.entry(id).or_default();
        let index = sequence.len() as u64;
        sequence.push(Milestone {
            product_id: id,
            index,
            milestone_type: milestone_type.to_string(),
            details: details.to_string(),
            timestamp: 0,
            participant,
        });
    }

    fn with_sequence<T>(
        &self,
        id: &ProductId,
        f: impl FnOnce(&[Milestone]) -> Result<T, MilestoneLedgerError>,
    ) -> Result<T, MilestoneLedgerError> {
        match self.sequences.read().get(id) {
            Some(sequence) => f(sequence),
            None => Err(MilestoneLedgerError::ProductNotFound { id: *id }),
        }
    }
}

impl MilestoneLedgerReader for MockMilestoneLedger {
    fn get_milestone_count(&self, id: &ProductId) -> Result<u64, MilestoneLedgerError> {
        self.with_sequence(id, |s| Ok(s.len() as u64))
    }

    fn get_milestone_at_index(
        &self,
        id: &ProductId,
        index: u64,
    ) -> Result<Milestone, MilestoneLedgerError> {
        self.with_sequence(id, |s| {
            usize::try_from(index)
                .ok()
                .and_then(|i| s.get(i))
                .cloned()
                .ok_or(MilestoneLedgerError::IndexOutOfBounds {
                    index,
                    count: s.len() as u64,
                })
        })
    }

    fn get_product_milestones(
        &self,
        id: &ProductId,
    ) -> Result<Vec<Milestone>, MilestoneLedgerError> {
        self.with_sequence(id, |s| Ok(s.to_vec()))
    }
}
