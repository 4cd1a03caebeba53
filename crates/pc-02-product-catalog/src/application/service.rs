//! # Product Catalog Service
//!
//! Application service owning product records.

use parking_lot::RwLock;
use shared_bus::{EventPublisher, InMemoryEventBus, ProductRegistered, ProvenanceEvent};
use shared_types::entities::{display_product_id, is_zero_address, Address, ProductId, Role};
use shared_types::errors::{Classified, StorageError};
use shared_types::gate::WriteGate;
use shared_types::storage::KeyValueStore;
use shared_types::time::TimeSource;
use std::sync::Arc;

use crate::adapters::ProductStore;
use crate::domain::{Product, ProductCatalogError};
use crate::ports::{ProductCatalogApi, ProductCatalogReader, RoleVerifier};

/// Product Catalog Service - manufacturer-gated registration.
pub struct ProductCatalogService<S: KeyValueStore> {
    /// Product records.
    store: RwLock<ProductStore<S>>,
    /// Read-only role checks.
    roles: Arc<dyn RoleVerifier>,
    /// Registry-wide writer mutex.
    gate: WriteGate,
    /// Source of `registered_at`.
    time: Arc<dyn TimeSource>,
    /// Event sink.
    publisher: Arc<dyn EventPublisher>,
}

impl<S: KeyValueStore> ProductCatalogService<S> {
    /// Open the catalog over `kv`, serializing writes on `gate`.
    ///
    /// Fails with `GateMismatch` when `roles` reports a different gate.
    pub fn new(
        kv: S,
        roles: Arc<dyn RoleVerifier>,
        gate: WriteGate,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, ProductCatalogError> {
        gate.ensure_shared(roles.write_gate(), "pc-02", "pc-01")?;

        Ok(Self {
            store: RwLock::new(ProductStore::new(kv)),
            roles,
            gate,
            time,
            publisher: Arc::new(InMemoryEventBus::new()),
        })
    }

    /// Publish events to `publisher` instead of a private bus.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    fn try_register(
        &self,
        caller: &Address,
        id: ProductId,
        name: &str,
        manufacturer: Address,
    ) -> Result<ProductRegistered, ProductCatalogError> {
        if !self.roles.is_verified_for_role(caller, Role::Manufacturer)? {
            return Err(ProductCatalogError::NotVerifiedManufacturer { caller: *caller });
        }
        if is_zero_address(&manufacturer) {
            return Err(ProductCatalogError::InvalidManufacturer);
        }
        if self.store.read().contains(&id)? {
            return Err(ProductCatalogError::ProductAlreadyExists { id });
        }

        let product = Product {
            id,
            name: name.to_string(),
            manufacturer,
            registered_at: self.time.now(),
        };
        self.store.write().insert(&product)?;

        Ok(ProductRegistered {
            product_id: id,
            manufacturer,
        })
    }
}

impl<S: KeyValueStore> ProductCatalogReader for ProductCatalogService<S> {
    fn get_product_details(&self, id: &ProductId) -> Result<Product, ProductCatalogError> {
        self.store
            .read()
            .get(id)?
            .ok_or(ProductCatalogError::ProductNotFound { id: *id })
    }

    fn product_exists(&self, id: &ProductId) -> Result<bool, StorageError> {
        self.store.read().contains(id)
    }

    fn write_gate(&self) -> Option<&WriteGate> {
        Some(&self.gate)
    }
}

impl<S: KeyValueStore> ProductCatalogApi for ProductCatalogService<S> {
    fn register_product(
        &self,
        caller: &Address,
        id: ProductId,
        name: &str,
        manufacturer: Address,
    ) -> Result<ProductRegistered, ProductCatalogError> {
        let _gate = self.gate.acquire();

        match self.try_register(caller, id, name, manufacturer) {
            Ok(event) => {
                tracing::info!(
                    "[pc-02] 📦 Registered product {} ({})",
                    display_product_id(&id),
                    name
                );
                self.publisher.publish(ProvenanceEvent::from(event));
                Ok(event)
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(
                    "[pc-02] Registering {} failed: {}",
                    display_product_id(&id),
                    err
                );
                Err(err)
            }
            Err(err) => {
                tracing::warn!(
                    "[pc-02] Registering {} rejected: {}",
                    display_product_id(&id),
                    err
                );
                Err(err)
            }
        }
    }

    fn product_count(&self) -> Result<u64, StorageError> {
        self.store.read().count()
    }
}
