//! # Registry Container
//!
//! Holds the component services and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: RoleRegistry (pc-01)     (no dependencies)
//! Level 1: ProductCatalog (pc-02)   (RoleVerifier)
//! Level 2: MilestoneLedger (pc-03)  (RoleVerifier, ProductCatalogReader)
//! Level 3: QueryFacade (pc-04)      (ProductCatalogReader, MilestoneLedgerReader)
//! ```
//!
//! ## Shared Infrastructure
//!
//! - One `WriteGate`: writes are totally ordered across all components
//! - One `InMemoryEventBus`: every committed write publishes here, in commit order
//! - One `TimeSource`

pub mod config;

pub use config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};

use std::fmt;
use std::sync::Arc;

use pc_01_role_registry::{RoleRegistryApi, RoleRegistryError, RoleRegistryService};
use pc_02_product_catalog::{ProductCatalogApi, ProductCatalogError, ProductCatalogService};
use pc_03_milestone_ledger::{MilestoneLedgerError, MilestoneLedgerService};
use pc_04_query_facade::{QueryFacade, QueryFacadeError};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, Subscription};
use shared_types::errors::StorageError;
use shared_types::gate::WriteGate;
use shared_types::time::TimeSource;
use thiserror::Error;

use crate::adapters::{DynStore, RegistryStores};

/// Concrete role registry used by the node.
pub type NodeRoleRegistry = RoleRegistryService<DynStore>;
/// Concrete product catalog used by the node.
pub type NodeProductCatalog = ProductCatalogService<DynStore>;
/// Concrete milestone ledger used by the node.
pub type NodeMilestoneLedger = MilestoneLedgerService<DynStore>;

/// Errors while assembling the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Role registry could not be opened (zero admin or storage failure).
    #[error("Role registry: {0}")]
    Registry(#[from] RoleRegistryError),

    /// Product catalog could not be wired.
    #[error("Product catalog: {0}")]
    Catalog(#[from] ProductCatalogError),

    /// Milestone ledger could not be wired.
    #[error("Milestone ledger: {0}")]
    Ledger(#[from] MilestoneLedgerError),

    /// Query facade could not be built.
    #[error("Query facade: {0}")]
    Query(#[from] QueryFacadeError),
}

/// Central container holding all component instances.
pub struct ProvenanceContainer {
    /// Node configuration.
    pub config: NodeConfig,
    /// Registry-wide writer mutex.
    pub gate: WriteGate,
    /// Event bus shared by every component.
    pub bus: Arc<InMemoryEventBus>,
    /// Role Registry (pc-01).
    pub roles: Arc<NodeRoleRegistry>,
    /// Product Catalog (pc-02).
    pub catalog: Arc<NodeProductCatalog>,
    /// Milestone Ledger (pc-03).
    pub ledger: Arc<NodeMilestoneLedger>,
    /// Query Facade (pc-04).
    pub query: QueryFacade,
}

impl ProvenanceContainer {
    /// Create the container, initializing components in dependency order.
    pub fn new(
        config: NodeConfig,
        stores: RegistryStores,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, ContainerError> {
        tracing::info!("Initializing registry components...");

        let gate = WriteGate::new();
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.events.channel_capacity));
        let publisher: Arc<dyn EventPublisher> = bus.clone();

        let RegistryStores {
            participants,
            products,
            milestones,
        } = stores;

        // Level 0
        let roles = Arc::new(
            RoleRegistryService::new(
                participants,
                config.registry.genesis_admin,
                gate.clone(),
                time.clone(),
            )?
            .with_publisher(publisher.clone()),
        );
        tracing::info!("  [pc-01] Role Registry initialized");

        // Level 1
        let catalog = Arc::new(
            ProductCatalogService::new(products, roles.clone(), gate.clone(), time.clone())?
                .with_publisher(publisher.clone()),
        );
        tracing::info!("  [pc-02] Product Catalog initialized");

        // Level 2
        let ledger = Arc::new(
            MilestoneLedgerService::new(
                milestones,
                roles.clone(),
                catalog.clone(),
                gate.clone(),
                time,
            )?
            .with_publisher(publisher),
        );
        tracing::info!("  [pc-03] Milestone Ledger initialized");

        // Level 3
        let query = QueryFacade::builder()
            .catalog(catalog.clone())
            .ledger(ledger.clone())
            .build()?;
        tracing::info!("  [pc-04] Query Facade initialized");

        Ok(Self {
            config,
            gate,
            bus,
            roles,
            catalog,
            ledger,
            query,
        })
    }

    /// Volatile container for tests and throwaway nodes.
    pub fn in_memory(
        config: NodeConfig,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, ContainerError> {
        Self::new(config, RegistryStores::in_memory(), time)
    }

    /// Subscribe to registry events.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Snapshot of registry counters.
    pub fn status(&self) -> Result<RegistryStatus, StorageError> {
        Ok(RegistryStatus {
            participants: self.roles.participant_count()?,
            products: self.catalog.product_count()?,
            events_published: self.bus.events_published(),
            subscribers: self.bus.subscriber_count(),
        })
    }
}

/// Registry counters reported at startup and shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStatus {
    /// Participant records, verified or not.
    pub participants: u64,
    /// Registered products.
    pub products: u64,
    /// Events published since startup.
    pub events_published: u64,
    /// Live bus subscribers.
    pub subscribers: usize,
}

impl fmt::Display for RegistryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "participants={} products={} events={} subscribers={}",
            self.participants, self.products, self.events_published, self.subscribers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_01_role_registry::RoleVerifier;
    use pc_02_product_catalog::ProductCatalogReader;
    use pc_03_milestone_ledger::{MilestoneLedgerApi, MilestoneLedgerReader};
    use pc_04_query_facade::QueryApi;
    use shared_bus::ProvenanceEvent;
    use shared_types::entities::{product_id_from_label, Role};
    use shared_types::time::ManualTimeSource;

    const ADMIN: [u8; 20] = [0xAA; 20];
    const MAKER: [u8; 20] = [0x11; 20];
    const SUPPLIER: [u8; 20] = [0x22; 20];

    fn container() -> ProvenanceContainer {
        let mut config = NodeConfig::default();
        config.registry.genesis_admin = ADMIN;
        ProvenanceContainer::in_memory(config, Arc::new(ManualTimeSource::new(1_000))).unwrap()
    }

    #[test]
    fn test_components_share_one_gate() {
        let c = container();
        assert!(c.roles.write_gate().is_some_and(|g| g.is_shared_with(&c.gate)));
        assert!(c.catalog.write_gate().is_some_and(|g| g.is_shared_with(&c.gate)));
    }

    #[test]
    fn test_zero_admin_rejected() {
        let result =
            ProvenanceContainer::in_memory(NodeConfig::default(), Arc::new(ManualTimeSource::new(0)));
        assert!(matches!(
            result,
            Err(ContainerError::Registry(RoleRegistryError::InvalidParticipant))
        ));
    }

    #[test]
    fn test_end_to_end_through_container() {
        let c = container();
        let mut events = c.subscribe(EventFilter::all());
        let p1 = product_id_from_label("P1").unwrap();

        c.roles
            .verify_participant(&ADMIN, MAKER, Role::Manufacturer)
            .unwrap();
        c.roles
            .verify_participant(&ADMIN, SUPPLIER, Role::Supplier)
            .unwrap();
        c.catalog.register_product(&MAKER, p1, "Widget", MAKER).unwrap();
        c.ledger
            .add_milestone(&SUPPLIER, p1, "Manufactured", "Factory A", 900)
            .unwrap();

        assert_eq!(c.ledger.get_milestone_count(&p1).unwrap(), 1);
        let provenance = c.query.get_product_provenance(&p1).unwrap();
        assert_eq!(provenance.product.name, "Widget");
        assert_eq!(provenance.milestones[0].participant, SUPPLIER);

        let names: Vec<_> = events.drain().iter().map(ProvenanceEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "ParticipantVerified",
                "ParticipantVerified",
                "ProductRegistered",
                "MilestoneAdded"
            ]
        );
    }

    #[test]
    fn test_status_counts() {
        let c = container();
        let _sub = c.subscribe(EventFilter::all());
        c.roles
            .verify_participant(&ADMIN, MAKER, Role::Manufacturer)
            .unwrap();

        let status = c.status().unwrap();
        assert_eq!(status.participants, 2);
        assert_eq!(status.products, 0);
        assert_eq!(status.events_published, 1);
        assert_eq!(status.subscribers, 1);
        assert!(status.to_string().contains("participants=2"));
    }
}
