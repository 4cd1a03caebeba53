//! # Domain Module
//!
//! Milestone records, append guards, and ledger errors.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
