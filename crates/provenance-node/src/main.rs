//! # Provenance-Chain Node
//!
//! Hosts the provenance registry in one process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Initialize telemetry
//! 3. Validate configuration for production (warn only)
//! 4. Lock the data directory and open the stores
//! 5. Wire the components and start the audit handler
//! 6. Run until Ctrl+C, then shut down gracefully

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use provenance_node::adapters::{DatabaseLock, RegistryStores};
use provenance_node::container::{NodeConfig, ProvenanceContainer, StorageBackend};
use provenance_node::NodeRuntime;
use provenance_telemetry::{init_telemetry, TelemetryConfig};
use shared_types::time::SystemTimeSource;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Invalid node configuration")?;
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    if let Err(e) = config.validate_for_production() {
        warn!("⚠️ Not production ready: {}", e);
    }

    let lock = match config.storage.backend {
        StorageBackend::Memory => None,
        _ => Some(
            DatabaseLock::acquire(&config.storage.data_dir)
                .context("Failed to lock data directory")?,
        ),
    };

    let stores = RegistryStores::open(&config.storage).context("Failed to open storage")?;
    let container = ProvenanceContainer::new(config, stores, Arc::new(SystemTimeSource))
        .context("Failed to initialize registry")?;

    let runtime = NodeRuntime::new(container, lock);
    runtime.start().context("Failed to read registry state")?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
