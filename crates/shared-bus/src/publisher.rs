//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventFilter, ProvenanceEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing events to the bus.
///
/// Publishing is synchronous: components call it from inside a write, while
/// holding the registry write gate.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// Returns the number of active subscribers that received the event.
    /// Zero subscribers is not an error.
    fn publish(&self, event: ProvenanceEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// An event stamped with its position on the bus.
#[derive(Debug, Clone)]
pub(crate) struct Sequenced {
    /// Zero-based publish order.
    pub(crate) seq: u64,
    pub(crate) event: ProvenanceEvent,
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
/// Every event gets the next bus sequence number, so a subscriber that lags
/// can name exactly which events it missed.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<Sequenced>,

    /// Next sequence number; also the total events published.
    next_seq: Mutex<u64>,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            next_seq: Mutex::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: ProvenanceEvent) -> usize {
        let topic = event.topic();
        let source = event.source_component();

        // Held across send so sequence order is channel order.
        let mut next_seq = self.next_seq.lock();
        let seq = *next_seq;
        *next_seq += 1;

        match self.sender.send(Sequenced { seq, event }) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    source = source,
                    seq = seq,
                    receivers = receiver_count,
                    "Event published"
                );
                receiver_count
            }
            Err(_) => {
                debug!(
                    topic = ?topic,
                    source = source,
                    seq = seq,
                    "Event published with no receivers"
                );
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        *self.next_seq.lock()
    }
}
