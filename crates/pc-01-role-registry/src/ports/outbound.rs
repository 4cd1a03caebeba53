//! # Outbound Ports
//!
//! Dependencies the role registry requires from its environment.
//!
//! - `KeyValueStore`: persistence for participant records
//! - `TimeSource`: "now" for `verified_at`
//! - `EventPublisher`: where `ParticipantVerified` / `VerificationRevoked` go

pub use shared_bus::EventPublisher;
pub use shared_types::storage::KeyValueStore;
pub use shared_types::time::TimeSource;
