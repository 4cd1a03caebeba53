//! # Outbound Ports
//!
//! Dependencies the milestone ledger requires from its environment.
//!
//! - `RoleVerifier`: is the caller a verified supplier?
//! - `ProductCatalogReader`: does the product exist?
//! - `KeyValueStore`: persistence for milestone sequences
//! - `TimeSource`: "now" for the future-timestamp check
//! - `EventPublisher`: where `MilestoneAdded` goes

pub use pc_01_role_registry::{MockRoleVerifier, RoleVerifier};
pub use pc_02_product_catalog::{MockProductCatalog, ProductCatalogReader};
pub use shared_bus::EventPublisher;
pub use shared_types::storage::KeyValueStore;
pub use shared_types::time::TimeSource;
