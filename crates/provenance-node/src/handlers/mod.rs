//! # Event Handlers
//!
//! Long-running tasks that consume the registry event bus.

pub mod audit;

pub use audit::{AuditHandler, AuditSummary};
