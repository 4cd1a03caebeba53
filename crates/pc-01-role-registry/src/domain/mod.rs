//! # Domain Module
//!
//! Participant records, guards, and errors for the role registry.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
