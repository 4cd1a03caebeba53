//! # Provenance Telemetry
//!
//! Structured logging for the provenance registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provenance_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Logs are now filtered and formatted
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PC_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |
//! | `PC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `PC_SERVICE_NAME` | `provenance-chain` | Service name |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level is not a valid filter directive.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global subscriber described by `config`.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs shutdown on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
