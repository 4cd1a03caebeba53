//! # Domain Errors
//!
//! Error types for the milestone ledger.

use shared_types::entities::{display_product_id, short_hex, Address, ProductId, Timestamp};
use shared_types::errors::{Classified, ErrorKind, StorageError};
use shared_types::gate::GateMismatch;
use thiserror::Error;

/// Milestone ledger error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MilestoneLedgerError {
    /// Caller is not a verified supplier.
    #[error("{} is not a verified supplier", short_hex(.caller))]
    NotVerifiedSupplier {
        /// The rejected caller.
        caller: Address,
    },

    /// Product is unknown to the catalog.
    #[error("Product {} not found", display_product_id(.id))]
    ProductNotFound {
        /// The missing id.
        id: ProductId,
    },

    /// Milestone type is the empty string.
    #[error("Milestone type must not be empty")]
    EmptyMilestoneType,

    /// Milestone details are the empty string.
    #[error("Milestone details must not be empty")]
    EmptyMilestoneDetails,

    /// Timestamp lies in the future.
    #[error("Timestamp {timestamp} is after current time {now}")]
    InvalidTimestamp {
        /// Submitted timestamp.
        timestamp: Timestamp,
        /// Ledger time at submission.
        now: Timestamp,
    },

    /// Index is not below the product's milestone count.
    #[error("Milestone index {index} out of bounds (count {count})")]
    IndexOutOfBounds {
        /// Requested index.
        index: u64,
        /// Milestones recorded for the product.
        count: u64,
    },

    /// Ledger and one of its upstream components serialize on different gates.
    #[error(transparent)]
    GateMismatch(#[from] GateMismatch),

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Classified for MilestoneLedgerError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotVerifiedSupplier { .. } => ErrorKind::NotVerifiedSupplier,
            Self::ProductNotFound { .. } => ErrorKind::ProductNotFound,
            Self::EmptyMilestoneType => ErrorKind::EmptyMilestoneType,
            Self::EmptyMilestoneDetails => ErrorKind::EmptyMilestoneDetails,
            Self::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::GateMismatch(_) => ErrorKind::GateMismatch,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
