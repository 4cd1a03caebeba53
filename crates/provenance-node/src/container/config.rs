//! # Node Configuration
//!
//! Unified configuration for the registry components and runtime parameters.
//!
//! ## Production Requirements
//!
//! - The genesis admin MUST NOT be the zero address
//! - The storage backend MUST be durable (not `memory`)

use shared_types::entities::{is_zero_address, parse_address, Address, ZERO_ADDRESS};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Role registry configuration.
    pub registry: RegistryConfig,
    /// Event bus configuration.
    pub events: EventConfig,
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PC_STORAGE_BACKEND`: `memory`, `file`, or `rocksdb` (default: file)
    /// - `PC_DATA_DIR`: Data directory (default: ./data)
    /// - `PC_ADMIN_ADDRESS`: Genesis admin, 20-byte hex (no default)
    /// - `PC_EVENT_CAPACITY`: Per-subscriber event buffer (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PC_STORAGE_BACKEND") {
            config.storage.backend = value.parse()?;
        }
        if let Some(value) = lookup("PC_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("PC_ADMIN_ADDRESS") {
            config.registry.genesis_admin =
                parse_address(&value).ok_or_else(|| ConfigError::InvalidValue {
                    variable: "PC_ADMIN_ADDRESS",
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup("PC_EVENT_CAPACITY") {
            config.events.channel_capacity = value
                .trim()
                .parse()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    variable: "PC_EVENT_CAPACITY",
                    value: value.clone(),
                })?;
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the genesis admin is the zero address
    /// - the storage backend is not durable
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if is_zero_address(&self.registry.genesis_admin) {
            return Err(ConfigError::MissingAdmin);
        }
        if self.storage.backend == StorageBackend::Memory {
            return Err(ConfigError::VolatileStorage);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Genesis admin is not set (zero value).
    #[error(
        "Genesis admin is the zero address. \
         Set PC_ADMIN_ADDRESS to the 20-byte hex address of the first admin."
    )]
    MissingAdmin,

    /// Memory backend loses all state on exit.
    #[error("Storage backend 'memory' is not durable. Set PC_STORAGE_BACKEND to 'file' or 'rocksdb'.")]
    VolatileStorage,

    /// An environment variable could not be parsed.
    #[error("Invalid value for {variable}: {value:?}")]
    InvalidValue {
        /// The variable name.
        variable: &'static str,
        /// The raw value.
        value: String,
    },
}

/// Which `KeyValueStore` implementation backs the three logical stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Volatile, for tests and throwaway nodes.
    Memory,
    /// One checksummed snapshot file per logical store.
    #[default]
    File,
    /// One column family per logical store. Requires the `rocksdb` feature.
    RocksDb,
}

impl StorageBackend {
    /// Lowercase name as accepted in `PC_STORAGE_BACKEND`.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::RocksDb => "rocksdb",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "rocksdb" | "rocks" => Ok(StorageBackend::RocksDb),
            _ => Err(ConfigError::InvalidValue {
                variable: "PC_STORAGE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend for all three logical stores.
    pub backend: StorageBackend,
    /// Data directory for snapshot files, the RocksDB directory, and the lock file.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Role registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Address recorded as a verified admin when the participant store is empty.
    /// MUST be set in production.
    pub genesis_admin: Address,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            genesis_admin: ZERO_ADDRESS, // MUST be overridden in production
        }
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    /// Events buffered per subscriber before it lags.
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
