//! # Query Facade
//!
//! Pure delegating view over the catalog and the ledger.

use pc_02_product_catalog::{Product, ProductCatalogError, ProductCatalogReader};
use pc_03_milestone_ledger::{Milestone, MilestoneLedgerError, MilestoneLedgerReader};
use shared_types::entities::{display_product_id, ProductId};
use shared_types::errors::StorageError;
use std::sync::Arc;

use crate::domain::{ProductProvenance, QueryFacadeError};
use crate::ports::QueryApi;

/// Read-only facade. Holds references, owns no state.
#[derive(Clone)]
pub struct QueryFacade {
    catalog: Arc<dyn ProductCatalogReader>,
    ledger: Arc<dyn MilestoneLedgerReader>,
}

impl QueryFacade {
    /// Build a facade. Fails `MissingDependency` if either delegate is absent.
    pub fn new(
        catalog: Option<Arc<dyn ProductCatalogReader>>,
        ledger: Option<Arc<dyn MilestoneLedgerReader>>,
    ) -> Result<Self, QueryFacadeError> {
        let catalog = catalog.ok_or(QueryFacadeError::MissingDependency {
            dependency: "product catalog",
        })?;
        let ledger = ledger.ok_or(QueryFacadeError::MissingDependency {
            dependency: "milestone ledger",
        })?;
        Ok(Self { catalog, ledger })
    }

    /// Start a builder.
    pub fn builder() -> QueryFacadeBuilder {
        QueryFacadeBuilder::default()
    }
}

impl QueryApi for QueryFacade {
    fn get_product_details(&self, id: &ProductId) -> Result<Product, ProductCatalogError> {
        self.catalog.get_product_details(id)
    }

    fn product_exists(&self, id: &ProductId) -> Result<bool, StorageError> {
        self.catalog.product_exists(id)
    }

    fn get_product_milestones(
        &self,
        id: &ProductId,
    ) -> Result<Vec<Milestone>, MilestoneLedgerError> {
        self.ledger.get_product_milestones(id)
    }

    fn get_product_provenance(
        &self,
        id: &ProductId,
    ) -> Result<ProductProvenance, QueryFacadeError> {
        let product = self.catalog.get_product_details(id)?;
        let milestones = self.ledger.get_product_milestones(id)?;
        tracing::debug!(
            "[pc-04] Provenance for {}: {} milestones",
            display_product_id(id),
            milestones.len()
        );
        Ok(ProductProvenance {
            product,
            milestones,
        })
    }
}

/// Builder for [`QueryFacade`].
#[derive(Default)]
pub struct QueryFacadeBuilder {
    catalog: Option<Arc<dyn ProductCatalogReader>>,
    ledger: Option<Arc<dyn MilestoneLedgerReader>>,
}

impl QueryFacadeBuilder {
    /// Set the catalog delegate.
    pub fn catalog(mut self, catalog: Arc<dyn ProductCatalogReader>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the ledger delegate.
    pub fn ledger(mut self, ledger: Arc<dyn MilestoneLedgerReader>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Finish. Fails `MissingDependency` if a delegate was not set.
    pub fn build(self) -> Result<QueryFacade, QueryFacadeError> {
        QueryFacade::new(self.catalog, self.ledger)
    }
}
