//! # Milestone Ledger Service
//!
//! Application service owning per-product milestone sequences.
//!
//! An append runs role check → product check → content checks → index
//! assignment → batch write → publish, all under the shared write gate, so
//! concurrent appends to one product get consecutive indices.

use parking_lot::RwLock;
use shared_bus::{EventPublisher, InMemoryEventBus, MilestoneAdded, ProvenanceEvent};
use shared_types::entities::{display_product_id, short_hex, Address, ProductId, Role, Timestamp};
use shared_types::errors::{Classified, StorageError};
use shared_types::gate::WriteGate;
use shared_types::storage::KeyValueStore;
use shared_types::time::TimeSource;
use std::sync::Arc;

use crate::adapters::MilestoneStore;
use crate::domain::{invariant_content, invariant_not_future, Milestone, MilestoneLedgerError};
use crate::ports::{MilestoneLedgerApi, MilestoneLedgerReader, ProductCatalogReader, RoleVerifier};

/// Milestone Ledger Service - supplier-gated append-only history.
pub struct MilestoneLedgerService<S: KeyValueStore> {
    /// Milestone sequences.
    store: RwLock<MilestoneStore<S>>,
    /// Read-only role checks.
    roles: Arc<dyn RoleVerifier>,
    /// Read-only product checks.
    catalog: Arc<dyn ProductCatalogReader>,
    /// Registry-wide writer mutex.
    gate: WriteGate,
    /// Source of "now" for the future-timestamp check.
    time: Arc<dyn TimeSource>,
    /// Event sink.
    publisher: Arc<dyn EventPublisher>,
}

impl<S: KeyValueStore> MilestoneLedgerService<S> {
    /// Open the ledger over `kv`, serializing writes on `gate`.
    ///
    /// The role check, product check and append of one `add_milestone` are
    /// atomic only if `roles` and `catalog` write under this same gate, so a
    /// mismatch fails with `GateMismatch`.
    pub fn new(
        kv: S,
        roles: Arc<dyn RoleVerifier>,
        catalog: Arc<dyn ProductCatalogReader>,
        gate: WriteGate,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, MilestoneLedgerError> {
        gate.ensure_shared(roles.write_gate(), "pc-03", "pc-01")?;
        gate.ensure_shared(catalog.write_gate(), "pc-03", "pc-02")?;

        Ok(Self {
            store: RwLock::new(MilestoneStore::new(kv)),
            roles,
            catalog,
            gate,
            time,
            publisher: Arc::new(InMemoryEventBus::new()),
        })
    }

    /// Publish events to `publisher` instead of a private bus.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    fn ensure_product(&self, id: &ProductId) -> Result<(), MilestoneLedgerError> {
        if self.catalog.product_exists(id)? {
            Ok(())
        } else {
            Err(MilestoneLedgerError::ProductNotFound { id: *id })
        }
    }

    fn try_add(
        &self,
        caller: &Address,
        id: ProductId,
        milestone_type: &str,
        details: &str,
        timestamp: Timestamp,
    ) -> Result<MilestoneAdded, MilestoneLedgerError> {
        if !self.roles.is_verified_for_role(caller, Role::Supplier)? {
            return Err(MilestoneLedgerError::NotVerifiedSupplier { caller: *caller });
        }
        self.ensure_product(&id)?;
        invariant_content(milestone_type, details)?;
        invariant_not_future(timestamp, self.time.now())?;

        let index = self.store.read().count(&id)?;
        let milestone = Milestone {
            product_id: id,
            index,
            milestone_type: milestone_type.to_string(),
            details: details.to_string(),
            timestamp,
            participant: *caller,
        };
        self.store.write().append(&milestone)?;

        Ok(MilestoneAdded {
            product_id: id,
            index,
            participant: *caller,
        })
    }
}

impl<S: KeyValueStore> MilestoneLedgerReader for MilestoneLedgerService<S> {
    fn get_milestone_count(&self, id: &ProductId) -> Result<u64, MilestoneLedgerError> {
        self.ensure_product(id)?;
        Ok(self.store.read().count(id)?)
    }

    fn get_milestone_at_index(
        &self,
        id: &ProductId,
        index: u64,
    ) -> Result<Milestone, MilestoneLedgerError> {
        self.ensure_product(id)?;

        let store = self.store.read();
        let count = store.count(id)?;
        if index >= count {
            return Err(MilestoneLedgerError::IndexOutOfBounds { index, count });
        }
        store.get(id, index)?.ok_or_else(|| {
            MilestoneLedgerError::Storage(StorageError::corrupted(format!(
                "milestone {} of {} missing below count {}",
                index,
                display_product_id(id),
                count
            )))
        })
    }

    fn get_product_milestones(
        &self,
        id: &ProductId,
    ) -> Result<Vec<Milestone>, MilestoneLedgerError> {
        self.ensure_product(id)?;
        let milestones = self.store.read().list(id)?;
        tracing::debug!(
            "[pc-03] Read {} milestones for {}",
            milestones.len(),
            display_product_id(id)
        );
        Ok(milestones)
    }
}

impl<S: KeyValueStore> MilestoneLedgerApi for MilestoneLedgerService<S> {
    fn add_milestone(
        &self,
        caller: &Address,
        id: ProductId,
        milestone_type: &str,
        details: &str,
        timestamp: Timestamp,
    ) -> Result<MilestoneAdded, MilestoneLedgerError> {
        let _gate = self.gate.acquire();

        match self.try_add(caller, id, milestone_type, details, timestamp) {
            Ok(event) => {
                tracing::info!(
                    "[pc-03] 🚚 {} #{} \"{}\" by {}",
                    display_product_id(&id),
                    event.index,
                    milestone_type,
                    short_hex(caller)
                );
                self.publisher.publish(ProvenanceEvent::from(event));
                Ok(event)
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(
                    "[pc-03] Milestone for {} failed: {}",
                    display_product_id(&id),
                    err
                );
                Err(err)
            }
            Err(err) => {
                tracing::warn!(
                    "[pc-03] Milestone for {} rejected: {}",
                    display_product_id(&id),
                    err
                );
                Err(err)
            }
        }
    }
}
