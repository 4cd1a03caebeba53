//! # PC-02 Product Catalog
//!
//! Decides what exists: manufacturer-gated product registration.
//!
//! **Component ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)  
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Exclusively owns product records. Registration requires the caller to be a
//! verified manufacturer (checked through the role registry's read-only
//! `RoleVerifier`). Ids are unique; records are immutable once written.
//!
//! ## Module Structure
//!
//! ```text
//! pc-02-product-catalog/
//! ├── domain/          # Product, ProductCatalogError
//! ├── ports/           # ProductCatalogReader + ProductCatalogApi (inbound), RoleVerifier etc. (outbound)
//! ├── adapters/        # ProductStore over any KeyValueStore
//! └── application/     # ProductCatalogService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::ProductStore;
pub use application::ProductCatalogService;
pub use domain::{Product, ProductCatalogError};
pub use ports::{MockProductCatalog, ProductCatalogApi, ProductCatalogReader};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
