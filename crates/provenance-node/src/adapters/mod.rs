//! # Adapters
//!
//! Concrete storage backends and process-level guards for the node.

pub mod lock;
pub mod storage;

pub use lock::{DatabaseLock, LockError};
pub use storage::{DynStore, FileBackedKVStore, RegistryStores};
