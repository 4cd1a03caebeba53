//! # Node Runtime
//!
//! Owns the container, the data directory lock, and the background handlers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared_bus::EventFilter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::adapters::DatabaseLock;
use crate::container::{ProvenanceContainer, RegistryStatus};
use crate::handlers::{AuditHandler, AuditSummary};

/// How long shutdown waits for handlers to drain.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The main node runtime orchestrating the registry.
pub struct NodeRuntime {
    /// Component container with all initialized services.
    container: Arc<ProvenanceContainer>,
    /// Held for the node's lifetime; `None` for the memory backend.
    _lock: Option<DatabaseLock>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    /// Running audit task.
    audit: Mutex<Option<JoinHandle<AuditSummary>>>,
}

impl NodeRuntime {
    /// Create a runtime around an assembled container.
    pub fn new(container: ProvenanceContainer, lock: Option<DatabaseLock>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            _lock: lock,
            shutdown_tx,
            shutdown_rx,
            audit: Mutex::new(None),
        }
    }

    /// Start the node runtime.
    ///
    /// ## Startup Sequence
    ///
    /// 1. Subscribe the audit handler (before any write can be accepted)
    /// 2. Spawn it
    /// 3. Report registry status
    pub fn start(&self) -> Result<RegistryStatus, shared_types::errors::StorageError> {
        info!("===========================================");
        info!("  Provenance-Chain Node v{}", crate::VERSION);
        info!("===========================================");

        let handler = AuditHandler::new(self.container.subscribe(EventFilter::all()));
        let handle = tokio::spawn(handler.run(self.shutdown_rx.clone()));
        *self.audit.lock() = Some(handle);

        let status = self.container.status()?;
        info!("Storage: {}", self.container.config.storage.backend);
        info!("Data Dir: {:?}", self.container.config.storage.data_dir);
        info!("Registry: {}", status);
        Ok(status)
    }

    /// Shutdown the node gracefully.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to all handlers
    /// 2. Wait for the audit handler (with timeout)
    /// 3. Release the data directory lock on drop
    pub async fn shutdown(&self) -> Option<AuditSummary> {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let handle = self.audit.lock().take();
        let summary = match handle {
            Some(handle) => match tokio::time::timeout(SHUTDOWN_GRACE, handle).await {
                Ok(Ok(summary)) => Some(summary),
                Ok(Err(e)) => {
                    error!("[audit] Handler task failed: {}", e);
                    None
                }
                Err(_) => {
                    warn!("[audit] Handler did not stop within {:?}", SHUTDOWN_GRACE);
                    None
                }
            },
            None => None,
        };

        match self.container.status() {
            Ok(status) => info!("Final registry state: {}", status),
            Err(e) => error!("Could not read final registry state: {}", e),
        }
        info!("Shutdown complete");
        summary
    }

    /// Get a reference to the registry container.
    pub fn container(&self) -> Arc<ProvenanceContainer> {
        Arc::clone(&self.container)
    }
}
