//! # Outbound Ports
//!
//! Dependencies the product catalog requires from its environment.
//!
//! - `RoleVerifier`: read-only role checks against the role registry
//! - `KeyValueStore`: persistence for product records
//! - `TimeSource`: "now" for `registered_at`
//! - `EventPublisher`: where `ProductRegistered` goes

pub use pc_01_role_registry::{MockRoleVerifier, RoleVerifier};
pub use shared_bus::EventPublisher;
pub use shared_types::storage::KeyValueStore;
pub use shared_types::time::TimeSource;
