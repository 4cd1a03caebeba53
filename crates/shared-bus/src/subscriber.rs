//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, ProvenanceEvent};
use crate::publisher::Sequenced;
use std::ops::Range;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<Sequenced>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Events skipped because this subscriber fell behind.
    lagged: u64,

    /// Skipped events not yet attributed to a sequence range.
    unplaced_lag: u64,

    /// Sequence ranges skipped since the last `take_gaps`.
    gaps: Vec<Range<u64>>,

    /// Sequence number of the last event taken off the channel.
    last_seq: Option<u64>,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<Sequenced>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            lagged: 0,
            unplaced_lag: 0,
            gaps: Vec::new(),
            last_seq: None,
        }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<ProvenanceEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(message) => self.accept(message),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    self.record_lag(count);
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next matching event without blocking.
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available
    /// - `Err(SubscriptionError::Closed)` - The bus was dropped
    pub fn try_recv(&mut self) -> Result<Option<ProvenanceEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(message) => self.accept(message),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    self.record_lag(count);
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Drains every matching event currently buffered.
    pub fn drain(&mut self) -> Vec<ProvenanceEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Total events this subscriber missed by lagging.
    #[must_use]
    pub fn lagged(&self) -> u64 {
        self.lagged
    }

    /// Bus sequence ranges missed by lagging since the previous call.
    ///
    /// A range is known once the first event after the gap has been
    /// received. Filtered-out events count toward the sequence.
    pub fn take_gaps(&mut self) -> Vec<Range<u64>> {
        std::mem::take(&mut self.gaps)
    }

    /// Bus sequence number of the last event taken off the channel.
    #[must_use]
    pub fn last_sequence(&self) -> Option<u64> {
        self.last_seq
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    fn accept(&mut self, message: Sequenced) -> ProvenanceEvent {
        if self.unplaced_lag > 0 {
            let start = message.seq.saturating_sub(self.unplaced_lag);
            self.gaps.push(start..message.seq);
            self.unplaced_lag = 0;
        }
        self.last_seq = Some(message.seq);
        message.event
    }

    fn record_lag(&mut self, count: u64) {
        self.lagged = self.lagged.saturating_add(count);
        self.unplaced_lag = self.unplaced_lag.saturating_add(count);
        warn!(lagged = count, "Subscriber lagged, some events dropped");
    }
}
