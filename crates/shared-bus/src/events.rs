//! # Registry Events
//!
//! Every successful write returns exactly one of these payloads and publishes
//! it, wrapped in `ProvenanceEvent`, to the bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{short_hex, Address, ProductId, Role};
use std::fmt;

/// A participant was verified for a role.
/// Source: RoleRegistry (pc-01)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantVerified {
    pub address: Address,
    pub role: Role,
}

/// A participant's verification was revoked. Role is retained.
/// Source: RoleRegistry (pc-01)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRevoked {
    pub address: Address,
}

/// A product was registered in the catalog.
/// Source: ProductCatalog (pc-02)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub product_id: ProductId,
    pub manufacturer: Address,
}

/// A milestone was appended to a product's ledger.
/// Source: MilestoneLedger (pc-03)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneAdded {
    pub product_id: ProductId,
    /// Position assigned at append time (count before append).
    pub index: u64,
    pub participant: Address,
}

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvenanceEvent {
    ParticipantVerified(ParticipantVerified),
    VerificationRevoked(VerificationRevoked),
    ProductRegistered(ProductRegistered),
    MilestoneAdded(MilestoneAdded),
}

impl ProvenanceEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ParticipantVerified(_) | Self::VerificationRevoked(_) => {
                EventTopic::Participants
            }
            Self::ProductRegistered(_) => EventTopic::Products,
            Self::MilestoneAdded(_) => EventTopic::Milestones,
        }
    }

    /// Name of the component that emitted this event.
    #[must_use]
    pub fn source_component(&self) -> &'static str {
        match self {
            Self::ParticipantVerified(_) | Self::VerificationRevoked(_) => "pc-01",
            Self::ProductRegistered(_) => "pc-02",
            Self::MilestoneAdded(_) => "pc-03",
        }
    }

    /// Stable event name used by the audit log.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParticipantVerified(_) => "ParticipantVerified",
            Self::VerificationRevoked(_) => "VerificationRevoked",
            Self::ProductRegistered(_) => "ProductRegistered",
            Self::MilestoneAdded(_) => "MilestoneAdded",
        }
    }

    /// JSON rendering for line-oriented audit sinks.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ProvenanceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParticipantVerified(e) => write!(
                f,
                "ParticipantVerified(addr={}, role={})",
                short_hex(&e.address),
                e.role
            ),
            Self::VerificationRevoked(e) => {
                write!(f, "VerificationRevoked(addr={})", short_hex(&e.address))
            }
            Self::ProductRegistered(e) => write!(
                f,
                "ProductRegistered(id={}, manufacturer={})",
                short_hex(&e.product_id),
                short_hex(&e.manufacturer)
            ),
            Self::MilestoneAdded(e) => write!(
                f,
                "MilestoneAdded(id={}, index={}, participant={})",
                short_hex(&e.product_id),
                e.index,
                short_hex(&e.participant)
            ),
        }
    }
}

impl From<ParticipantVerified> for ProvenanceEvent {
    fn from(value: ParticipantVerified) -> Self {
        Self::ParticipantVerified(value)
    }
}

impl From<VerificationRevoked> for ProvenanceEvent {
    fn from(value: VerificationRevoked) -> Self {
        Self::VerificationRevoked(value)
    }
}

impl From<ProductRegistered> for ProvenanceEvent {
    fn from(value: ProductRegistered) -> Self {
        Self::ProductRegistered(value)
    }
}

impl From<MilestoneAdded> for ProvenanceEvent {
    fn from(value: MilestoneAdded) -> Self {
        Self::MilestoneAdded(value)
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// RoleRegistry events.
    Participants,
    /// ProductCatalog events.
    Products,
    /// MilestoneLedger events.
    Milestones,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ProvenanceEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone_event() -> ProvenanceEvent {
        MilestoneAdded {
            product_id: [7u8; 32],
            index: 3,
            participant: [9u8; 20],
        }
        .into()
    }

    #[test]
    fn test_event_topic_mapping() {
        let verified: ProvenanceEvent = ParticipantVerified {
            address: [1u8; 20],
            role: Role::Supplier,
        }
        .into();
        let revoked: ProvenanceEvent = VerificationRevoked { address: [1u8; 20] }.into();

        assert_eq!(verified.topic(), EventTopic::Participants);
        assert_eq!(revoked.topic(), EventTopic::Participants);
        assert_eq!(milestone_event().topic(), EventTopic::Milestones);
        assert_eq!(milestone_event().source_component(), "pc-03");
    }

    #[test]
    fn test_filter_all() {
        assert!(EventFilter::all().matches(&milestone_event()));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Products]);
        assert!(!filter.matches(&milestone_event()));

        let registered: ProvenanceEvent = ProductRegistered {
            product_id: [1u8; 32],
            manufacturer: [2u8; 20],
        }
        .into();
        assert!(filter.matches(&registered));
    }

    #[test]
    fn test_display_is_abbreviated() {
        let rendered = milestone_event().to_string();
        assert!(rendered.starts_with("MilestoneAdded("));
        assert!(rendered.contains("index=3"));
    }

    #[test]
    fn test_json_names_variant() {
        let json = milestone_event().to_json().unwrap();
        assert!(json.contains("MilestoneAdded"));
        assert!(json.contains("\"index\":3"));
    }
}
