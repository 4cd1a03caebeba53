//! # Shared Bus - Registry Event Bus
//!
//! Carries the events emitted by successful registry writes to the external
//! audit/observability collaborator.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Component   │                    │ Audit / Obs. │
//! │ (pc-01..03)  │    publish()       │  subscriber  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Ordering
//!
//! Components publish while still holding the registry write gate, so the
//! order events leave the bus is the order writes were committed.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{
    EventFilter, EventTopic, MilestoneAdded, ParticipantVerified, ProductRegistered,
    ProvenanceEvent, VerificationRevoked,
};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}
