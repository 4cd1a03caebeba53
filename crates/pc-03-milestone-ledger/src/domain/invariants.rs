//! # Domain Invariants
//!
//! Content checks for a milestone submission. Role and product checks run
//! before these.

use super::errors::MilestoneLedgerError;
use shared_types::entities::Timestamp;

/// Invariant: type and details are non-empty, type checked first.
///
/// Whitespace-only strings are accepted.
pub fn invariant_content(milestone_type: &str, details: &str) -> Result<(), MilestoneLedgerError> {
    if milestone_type.is_empty() {
        return Err(MilestoneLedgerError::EmptyMilestoneType);
    }
    if details.is_empty() {
        return Err(MilestoneLedgerError::EmptyMilestoneDetails);
    }
    Ok(())
}

/// Invariant: the timestamp is not in the future. Equal to `now` is allowed.
pub fn invariant_not_future(timestamp: Timestamp, now: Timestamp) -> Result<(), MilestoneLedgerError> {
    if timestamp > now {
        Err(MilestoneLedgerError::InvalidTimestamp { timestamp, now })
    } else {
        Ok(())
    }
}
