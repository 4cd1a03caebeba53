//! # Provenance Node Library
//!
//! Internal modules of the provenance node, exposed for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and component wiring
//! - `adapters/` - Storage backends and the data directory lock
//! - `handlers/` - Event bus consumers
//! - `runtime` - Startup and graceful shutdown
//!
//! ## Write Flow
//!
//! ```text
//! caller ──→ pc-01 / pc-02 / pc-03 ──[WriteGate]──→ KeyValueStore
//!                       │
//!                       └──publish──→ InMemoryEventBus ──→ AuditHandler
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod runtime;

pub use container::{NodeConfig, ProvenanceContainer, RegistryStatus};
pub use runtime::NodeRuntime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
