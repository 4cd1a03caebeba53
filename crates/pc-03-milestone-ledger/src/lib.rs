//! # PC-03 Milestone Ledger
//!
//! Records what happened to each product, in order.
//!
//! **Component ID:** 03  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)  
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Exclusively owns one append-only milestone sequence per product. Only
//! verified suppliers may append, and only to products the catalog knows.
//!
//! ## Ordering Guarantees
//!
//! | Property | Rule |
//! |----------|------|
//! | Index assignment | `index = count before append`, under the write gate |
//! | Read order | Ascending index, i.e. submission order |
//! | Timestamps | Caller-supplied, `<= now`, never used for ordering |
//! | Mutation | None: no update, no delete |
//!
//! ## Module Structure
//!
//! ```text
//! pc-03-milestone-ledger/
//! ├── domain/          # Milestone, content/timestamp guards, errors
//! ├── ports/           # MilestoneLedgerReader + MilestoneLedgerApi (inbound)
//! ├── adapters/        # MilestoneStore (entry + count keys, batch append)
//! └── application/     # MilestoneLedgerService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::MilestoneStore;
pub use application::MilestoneLedgerService;
pub use domain::{Milestone, MilestoneLedgerError};
pub use ports::{MilestoneLedgerApi, MilestoneLedgerReader, MockMilestoneLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
