//! # Storage Port
//!
//! Abstract key-value persistence used by every registry component.
//!
//! Each component owns exactly one logical store:
//!
//! | Component        | Logical store                                  |
//! |------------------|------------------------------------------------|
//! | RoleRegistry     | participant address → Participant              |
//! | ProductCatalog   | product id → Product                           |
//! | MilestoneLedger  | product id → ordered list of Milestone         |
//!
//! Production: file-backed and RocksDB stores in `provenance-node`.
//! Testing: `InMemoryKVStore` (below).

use crate::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>)
        -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, StorageError>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn atomic_batch_write(
        &mut self,
        operations: Vec<BatchOperation>,
    ) -> Result<(), StorageError> {
        (**self).atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        (**self).exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        (**self).prefix_scan(prefix)
    }
}

/// Batch operation for atomic writes.
///
/// The registry is append-only, so the only operation is `Put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Encodes a record for storage (bincode).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(value).map_err(|e| StorageError::Codec {
        message: e.to_string(),
    })
}

/// Decodes a stored record (bincode).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Codec {
        message: e.to_string(),
    })
}

/// In-memory key-value store.
///
/// Used by unit tests and by nodes configured with the memory backend.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(
        &mut self,
        operations: Vec<BatchOperation>,
    ) -> Result<(), StorageError> {
        // Inserts cannot fail, so applying in order is all-or-nothing.
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        let mut results: Vec<_> = self
            .data
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }
}
