//! # Domain Module
//!
//! Product records and catalog errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
