//! # Milestone Store
//!
//! Typed view of the product-id → ordered-list-of-Milestone logical store.
//!
//! Key layout:
//!
//! | Key                                   | Value              |
//! |---------------------------------------|--------------------|
//! | `b'm' ‖ product_id(32) ‖ index(u64 BE)` | Milestone (bincode) |
//! | `b'n' ‖ product_id(32)`                 | count (u64 BE)      |
//!
//! Big-endian indices make a prefix scan return entries in append order.

use crate::domain::Milestone;
use shared_types::entities::ProductId;
use shared_types::errors::StorageError;
use shared_types::storage::{decode, encode, BatchOperation, KeyValueStore};

const ENTRY_PREFIX: u8 = b'm';
const COUNT_PREFIX: u8 = b'n';

fn entries_prefix(id: &ProductId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + id.len() + 8);
    key.push(ENTRY_PREFIX);
    key.extend_from_slice(id);
    key
}

fn entry_key(id: &ProductId, index: u64) -> Vec<u8> {
    let mut key = entries_prefix(id);
    key.extend_from_slice(&index.to_be_bytes());
    key
}

fn count_key(id: &ProductId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + id.len());
    key.push(COUNT_PREFIX);
    key.extend_from_slice(id);
    key
}

/// Per-product milestone sequences over any `KeyValueStore`.
pub struct MilestoneStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> MilestoneStore<S> {
    /// Wraps `kv`.
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Number of milestones recorded for `id` (0 if none).
    pub fn count(&self, id: &ProductId) -> Result<u64, StorageError> {
        match self.kv.get(&count_key(id))? {
            None => Ok(0),
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StorageError::corrupted(format!(
                        "milestone count has {} bytes, expected 8",
                        bytes.len()
                    ))
                })?;
                Ok(u64::from_be_bytes(raw))
            }
        }
    }

    /// Milestone at `index`, if recorded.
    pub fn get(&self, id: &ProductId, index: u64) -> Result<Option<Milestone>, StorageError> {
        match self.kv.get(&entry_key(id, index))? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Every milestone for `id`, in append order.
    pub fn list(&self, id: &ProductId) -> Result<Vec<Milestone>, StorageError> {
        self.kv
            .prefix_scan(&entries_prefix(id))?
            .into_iter()
            .map(|(_, bytes)| decode(&bytes))
            .collect()
    }

    /// Appends `milestone` at its index and bumps the count in one batch.
    ///
    /// The caller assigns `milestone.index` from [`Self::count`] while
    /// holding the write gate.
    pub fn append(&mut self, milestone: &Milestone) -> Result<(), StorageError> {
        let next = milestone.index.checked_add(1).ok_or_else(|| {
            StorageError::corrupted("milestone count overflow")
        })?;
        let batch = vec![
            BatchOperation::put(
                entry_key(&milestone.product_id, milestone.index),
                encode(milestone)?,
            ),
            BatchOperation::put(count_key(&milestone.product_id), next.to_be_bytes().to_vec()),
        ];
        self.kv.atomic_batch_write(batch)
    }

    /// Returns the wrapped store.
    pub fn into_inner(self) -> S {
        self.kv
    }
}
