//! # Domain Errors
//!
//! The facade adds no domain errors of its own. Delegate errors pass through
//! unchanged; only construction can fail here.

use pc_02_product_catalog::ProductCatalogError;
use pc_03_milestone_ledger::MilestoneLedgerError;
use shared_types::errors::{Classified, ErrorKind};
use thiserror::Error;

/// Query facade error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFacadeError {
    /// A required delegate was not supplied at construction.
    #[error("Missing dependency: {dependency}")]
    MissingDependency {
        /// Which delegate is absent.
        dependency: &'static str,
    },

    /// Error from the product catalog, unchanged.
    #[error(transparent)]
    Catalog(#[from] ProductCatalogError),

    /// Error from the milestone ledger, unchanged.
    #[error(transparent)]
    Ledger(#[from] MilestoneLedgerError),
}

impl Classified for QueryFacadeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDependency { .. } => ErrorKind::MissingDependency,
            Self::Catalog(err) => err.kind(),
            Self::Ledger(err) => err.kind(),
        }
    }
}
