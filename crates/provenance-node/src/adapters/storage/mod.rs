//! # Production Storage Adapters
//!
//! Durable backends for the three logical stores.
//!
//! ## Usage
//!
//! The file backend is always available. Enable the `rocksdb` feature for the
//! RocksDB backend:
//!
//! ```toml
//! provenance-node = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! ## Layout
//!
//! | Backend | participants           | products           | milestones           |
//! |---------|------------------------|--------------------|----------------------|
//! | memory  | `InMemoryKVStore`      | `InMemoryKVStore`  | `InMemoryKVStore`    |
//! | file    | `participants.db`      | `products.db`      | `milestones.db`      |
//! | rocksdb | `rocksdb/` cf `participants` | cf `products` | cf `milestones`     |

pub mod file;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use file::FileBackedKVStore;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{
    open_database, RocksDbConfig, RocksDbStore, CF_MILESTONES, CF_PARTICIPANTS, CF_PRODUCTS,
    COLUMN_FAMILIES,
};

use crate::container::config::{StorageBackend, StorageConfig};
use shared_types::errors::StorageError;
use shared_types::storage::{InMemoryKVStore, KeyValueStore};

/// Backend-erased store handed to the component services.
pub type DynStore = Box<dyn KeyValueStore>;

/// The three logical stores, one per owning component.
pub struct RegistryStores {
    /// Participant address → Participant (pc-01).
    pub participants: DynStore,
    /// Product id → Product (pc-02).
    pub products: DynStore,
    /// Product id → milestone sequence (pc-03).
    pub milestones: DynStore,
}

impl RegistryStores {
    /// Volatile stores.
    pub fn in_memory() -> Self {
        Self {
            participants: Box::new(InMemoryKVStore::new()),
            products: Box::new(InMemoryKVStore::new()),
            milestones: Box::new(InMemoryKVStore::new()),
        }
    }

    /// Opens the stores for the configured backend.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        tracing::info!(
            "[storage] Opening {} stores in {}",
            config.backend,
            config.data_dir.display()
        );

        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::File => Ok(Self {
                participants: Box::new(FileBackedKVStore::open(
                    config.data_dir.join("participants.db"),
                )?),
                products: Box::new(FileBackedKVStore::open(config.data_dir.join("products.db"))?),
                milestones: Box::new(FileBackedKVStore::open(
                    config.data_dir.join("milestones.db"),
                )?),
            }),
            StorageBackend::RocksDb => Self::open_rocksdb(config),
        }
    }

    #[cfg(feature = "rocksdb")]
    fn open_rocksdb(config: &StorageConfig) -> Result<Self, StorageError> {
        let (participants, products, milestones) =
            RocksDbStore::open_all(config.data_dir.join("rocksdb"))?;
        Ok(Self {
            participants: Box::new(participants),
            products: Box::new(products),
            milestones: Box::new(milestones),
        })
    }

    #[cfg(not(feature = "rocksdb"))]
    fn open_rocksdb(_config: &StorageConfig) -> Result<Self, StorageError> {
        Err(StorageError::io(
            "RocksDB backend requested but provenance-node was built without the `rocksdb` feature",
        ))
    }
}
