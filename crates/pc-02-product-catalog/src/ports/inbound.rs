//! # Inbound Ports
//!
//! What the product catalog offers to the rest of the system.
//!
//! The milestone ledger and the query facade receive only
//! [`ProductCatalogReader`].

use crate::domain::{Product, ProductCatalogError};
use parking_lot::RwLock;
use shared_bus::ProductRegistered;
use shared_types::entities::{Address, ProductId};
use shared_types::errors::StorageError;
use shared_types::gate::WriteGate;
use std::collections::HashMap;

/// Read capability over the catalog.
pub trait ProductCatalogReader: Send + Sync {
    /// Full record for `id`, or `ProductNotFound`.
    fn get_product_details(&self, id: &ProductId) -> Result<Product, ProductCatalogError>;

    /// Whether `id` is registered. Never a domain error.
    fn product_exists(&self, id: &ProductId) -> Result<bool, StorageError>;

    /// Gate guarding catalog writes, if any.
    fn write_gate(&self) -> Option<&WriteGate> {
        None
    }
}

/// Product Catalog API - inbound port.
pub trait ProductCatalogApi: ProductCatalogReader {
    /// Register a new product. Verified manufacturers only.
    ///
    /// Check order: `NotVerifiedManufacturer`, `InvalidManufacturer`,
    /// `ProductAlreadyExists`.
    fn register_product(
        &self,
        caller: &Address,
        id: ProductId,
        name: &str,
        manufacturer: Address,
    ) -> Result<ProductRegistered, ProductCatalogError>;

    /// Number of registered products.
    fn product_count(&self) -> Result<u64, StorageError>;
}

// =============================================================================
// Mock Implementation (for downstream tests)
// =============================================================================

/// In-memory catalog reader with directly insertable products.
#[derive(Debug, Default)]
pub struct MockProductCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MockProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `product`, bypassing every check.
    pub fn insert(&self, product: Product) {
        self.products.write().insert(product.id, product);
    }
}

impl ProductCatalogReader for MockProductCatalog {
    fn get_product_details(&self, id: &ProductId) -> Result<Product, ProductCatalogError> {
        self.products
            .read()
            .get(id)
            .cloned()
            .ok_or(ProductCatalogError::ProductNotFound { id: *id })
    }

    fn product_exists(&self, id: &ProductId) -> Result<bool, StorageError> {
        Ok(self.products.read().contains_key(id))
    }
}
