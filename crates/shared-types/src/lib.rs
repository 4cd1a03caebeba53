//! # Shared Types Crate
//!
//! Identity, role, time, and storage primitives used by every registry
//! component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `ProductId`, and `Role` are defined
//!   here and nowhere else.
//! - **Closed Roles**: `Role` is a closed enum; there is no stringly-typed role.
//! - **Fatal vs Domain**: `StorageError` is the only fatal category. Domain
//!   errors live in the component crates and are classified with `ErrorKind`.
//! - **One Writer**: every mutating call in the registry holds the same
//!   `WriteGate`, so writes are totally ordered across components.

pub mod entities;
pub mod errors;
pub mod gate;
pub mod storage;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use gate::{GateMismatch, WriteGate};
pub use storage::{decode, encode, BatchOperation, InMemoryKVStore, KeyValueStore};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
