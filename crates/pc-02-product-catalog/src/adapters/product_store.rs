//! # Product Store
//!
//! Typed view of the product-id → Product logical store.
//!
//! Key layout: `b'r' ‖ product_id(32)`.

use crate::domain::Product;
use shared_types::entities::ProductId;
use shared_types::errors::StorageError;
use shared_types::storage::{decode, encode, KeyValueStore};

const PRODUCT_PREFIX: u8 = b'r';

fn product_key(id: &ProductId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + id.len());
    key.push(PRODUCT_PREFIX);
    key.extend_from_slice(id);
    key
}

/// Product records over any `KeyValueStore`.
pub struct ProductStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ProductStore<S> {
    /// Wraps `kv`.
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Loads the record for `id`, if any.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        match self.kv.get(&product_key(id))? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Whether a record exists for `id`.
    pub fn contains(&self, id: &ProductId) -> Result<bool, StorageError> {
        self.kv.exists(&product_key(id))
    }

    /// Writes a new record.
    pub fn insert(&mut self, product: &Product) -> Result<(), StorageError> {
        let value = encode(product)?;
        self.kv.put(&product_key(&product.id), &value)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, StorageError> {
        Ok(self.kv.prefix_scan(&[PRODUCT_PREFIX])?.len() as u64)
    }

    /// Returns the wrapped store.
    pub fn into_inner(self) -> S {
        self.kv
    }
}
