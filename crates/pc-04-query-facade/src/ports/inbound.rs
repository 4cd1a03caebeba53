//! # Inbound Ports
//!
//! The read-only surface offered to untrusted consumers.

use crate::domain::{ProductProvenance, QueryFacadeError};
use pc_02_product_catalog::{Product, ProductCatalogError};
use pc_03_milestone_ledger::{Milestone, MilestoneLedgerError};
use shared_types::entities::ProductId;
use shared_types::errors::StorageError;

/// Query API - inbound port.
///
/// No authorization and no validation of its own. Each method returns the
/// delegate's own error type.
pub trait QueryApi: Send + Sync {
    /// Delegates to the product catalog.
    fn get_product_details(&self, id: &ProductId) -> Result<Product, ProductCatalogError>;

    /// Delegates to the product catalog.
    fn product_exists(&self, id: &ProductId) -> Result<bool, StorageError>;

    /// Delegates to the milestone ledger.
    fn get_product_milestones(&self, id: &ProductId)
        -> Result<Vec<Milestone>, MilestoneLedgerError>;

    /// Product details and full history in one read.
    fn get_product_provenance(&self, id: &ProductId)
        -> Result<ProductProvenance, QueryFacadeError>;
}
