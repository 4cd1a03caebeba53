//! # Milestone Entities

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, ProductId, Timestamp};

/// One entry in a product's append-only history.
///
/// `index` is assigned at append time and alone defines order.
/// `timestamp` is caller-supplied and may be out of chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Product this milestone belongs to.
    pub product_id: ProductId,
    /// 0-based position in the product's sequence.
    pub index: u64,
    /// Free-form kind, e.g. "Shipped". Never empty.
    pub milestone_type: String,
    /// Free-form description. Never empty.
    pub details: String,
    /// When the event happened, per the submitter. Never in the future.
    pub timestamp: Timestamp,
    /// Verified supplier who submitted it.
    pub participant: Address,
}
