//! # Audit Handler
//!
//! Subscribes to the registry bus and writes one structured log line per
//! committed write. Stops on the shutdown signal or when the bus closes.

use provenance_telemetry::log_event;
use shared_bus::Subscription;
use std::ops::Range;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Counters reported when the handler stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    /// Events written to the audit log.
    pub recorded: u64,
    /// Events skipped because the handler fell behind the bus.
    pub lagged: u64,
    /// Bus sequence ranges missing from the audit log.
    pub missed: Vec<Range<u64>>,
}

/// Event handler for the audit trail.
pub struct AuditHandler {
    subscription: Subscription,
}

impl AuditHandler {
    /// Create a handler draining `subscription`.
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until shutdown is signalled or the bus is dropped.
    ///
    /// Pending events are recorded before a shutdown signal is honoured.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> AuditSummary {
        let mut recorded = 0u64;
        let mut missed = Vec::new();

        loop {
            tokio::select! {
                biased;

                event = self.subscription.recv() => {
                    let Some(event) = event else {
                        debug!("[audit] Event bus closed");
                        break;
                    };
                    for gap in self.subscription.take_gaps() {
                        log_event!(
                            warn,
                            "audit",
                            "audit log gap",
                            first_seq = gap.start,
                            last_seq = gap.end - 1,
                            missed = gap.end - gap.start
                        );
                        missed.push(gap);
                    }
                    log_event!(
                        info,
                        event.source_component(),
                        "registry event",
                        seq = ?self.subscription.last_sequence(),
                        event = event.name(),
                        detail = %event
                    );
                    match event.to_json() {
                        Ok(json) => debug!(target: "audit", "{}", json),
                        Err(e) => warn!("[audit] Could not encode {}: {}", event.name(), e),
                    }
                    recorded += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[audit] Shutdown signal received");
                        break;
                    }
                }
            }
        }

        let summary = AuditSummary {
            recorded,
            lagged: self.subscription.lagged(),
            missed,
        };
        if summary.lagged > 0 {
            warn!(
                "[audit] ⚠️ Missed {} events (subscriber lagged) in ranges {:?}",
                summary.lagged, summary.missed
            );
        }
        info!("[audit] Recorded {} events", summary.recorded);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, ProductRegistered};

    fn registered(n: u8) -> ProductRegistered {
        ProductRegistered {
            product_id: [n; 32],
            manufacturer: [1; 20],
        }
    }

    #[tokio::test]
    async fn test_records_until_bus_closes() {
        let bus = InMemoryEventBus::new();
        let handler = AuditHandler::new(bus.subscribe(EventFilter::all()));
        let (_tx, rx) = watch::channel(false);

        for n in 0..3 {
            bus.publish(registered(n).into());
        }
        drop(bus);

        let summary = handler.run(rx).await;
        assert_eq!(summary.recorded, 3);
        assert_eq!(summary.lagged, 0);
    }

    #[tokio::test]
    async fn test_stops_on_shutdown() {
        let bus = InMemoryEventBus::new();
        let handler = AuditHandler::new(bus.subscribe(EventFilter::all()));
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(handler.run(rx));
        bus.publish(registered(1).into());
        tx.send(true).unwrap();

        let summary = task.await.unwrap();
        assert!(summary.recorded <= 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_reports_lag() {
        let bus = InMemoryEventBus::with_capacity(2);
        let handler = AuditHandler::new(bus.subscribe(EventFilter::all()));
        let (_tx, rx) = watch::channel(false);

        for n in 0..5 {
            bus.publish(registered(n).into());
        }
        drop(bus);

        let summary = handler.run(rx).await;
        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.lagged, 3);
        assert_eq!(summary.missed, vec![0..3]);
    }

    #[tokio::test]
    async fn test_no_gaps_when_keeping_up() {
        let bus = InMemoryEventBus::with_capacity(4);
        let handler = AuditHandler::new(bus.subscribe(EventFilter::all()));
        let (_tx, rx) = watch::channel(false);

        for n in 0..4 {
            bus.publish(registered(n).into());
        }
        drop(bus);

        let summary = handler.run(rx).await;
        assert_eq!(summary.recorded, 4);
        assert!(summary.missed.is_empty());
    }
}
