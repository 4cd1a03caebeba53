//! # PC-04 Query Facade
//!
//! Read-only aggregation view for untrusted consumers.
//!
//! **Component ID:** 04  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)  
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Owns nothing. Holds read capabilities on the product catalog and the
//! milestone ledger and forwards queries to them without authorization or
//! validation. Never touches the role registry.
//!
//! ```text
//!                  ┌──────────────────┐
//!   consumer ────→ │   QueryFacade    │
//!                  └───┬──────────┬───┘
//!                      │          │
//!        ProductCatalogReader   MilestoneLedgerReader
//!                      ↓          ↓
//!                 ┌────────┐  ┌────────┐
//!                 │ pc-02  │  │ pc-03  │
//!                 └────────┘  └────────┘
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! pc-04-query-facade/
//! ├── domain/          # ProductProvenance, QueryFacadeError
//! ├── ports/           # QueryApi (inbound)
//! └── application/     # QueryFacade + builder
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{QueryFacade, QueryFacadeBuilder};
pub use domain::{ProductProvenance, QueryFacadeError};
pub use ports::QueryApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
