//! # Domain Errors
//!
//! Error types for the product catalog.

use shared_types::entities::{display_product_id, short_hex, Address, ProductId};
use shared_types::errors::{Classified, ErrorKind, StorageError};
use shared_types::gate::GateMismatch;
use thiserror::Error;

/// Product catalog error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductCatalogError {
    /// Caller is not a verified manufacturer.
    #[error("{} is not a verified manufacturer", short_hex(.caller))]
    NotVerifiedManufacturer {
        /// The rejected caller.
        caller: Address,
    },

    /// Manufacturer address is the null identity.
    #[error("Invalid manufacturer: zero address")]
    InvalidManufacturer,

    /// A product with this id is already registered.
    #[error("Product {} already exists", display_product_id(.id))]
    ProductAlreadyExists {
        /// The duplicate id.
        id: ProductId,
    },

    /// No product with this id.
    #[error("Product {} not found", display_product_id(.id))]
    ProductNotFound {
        /// The missing id.
        id: ProductId,
    },

    /// Catalog and role registry serialize on different gates.
    #[error(transparent)]
    GateMismatch(#[from] GateMismatch),

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Classified for ProductCatalogError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotVerifiedManufacturer { .. } => ErrorKind::NotVerifiedManufacturer,
            Self::InvalidManufacturer => ErrorKind::InvalidManufacturer,
            Self::ProductAlreadyExists { .. } => ErrorKind::ProductAlreadyExists,
            Self::ProductNotFound { .. } => ErrorKind::ProductNotFound,
            Self::GateMismatch(_) => ErrorKind::GateMismatch,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
