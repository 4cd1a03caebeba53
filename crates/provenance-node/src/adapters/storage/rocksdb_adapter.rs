//! # RocksDB Storage Adapter
//!
//! Production-ready RocksDB implementation of the KeyValueStore trait.
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch)
//! - Column families for component isolation
//! - Snappy compression
//! - Bloom filters for read optimization
//! - fsync on write for durability
//!
//! ## Column Families
//!
//! - `participants` - Participant records (pc-01)
//! - `products` - Product records (pc-02)
//! - `milestones` - Milestone sequences and counts (pc-03)
//!
//! One database is opened per node. Each logical store is a `RocksDbStore`
//! handle bound to one column family of that shared database.

use rocksdb::{ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use shared_types::errors::StorageError;
use shared_types::storage::{BatchOperation, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Column family for participant records (pc-01)
pub const CF_PARTICIPANTS: &str = "participants";
/// Column family for product records (pc-02)
pub const CF_PRODUCTS: &str = "products";
/// Column family for milestone entries and counts (pc-03)
pub const CF_MILESTONES: &str = "milestones";

/// All column families used by the node
pub const COLUMN_FAMILIES: &[&str] = &[CF_PARTICIPANTS, CF_PRODUCTS, CF_MILESTONES];

/// RocksDB configuration for production use
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// Open or create the node database with every column family.
pub fn open_database(config: &RocksDbConfig) -> Result<Arc<DB>, StorageError> {
    let mut opts = Options::default();
    opts.create_if_missing(true);
    opts.create_missing_column_families(true);
    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

    // Bloom filter for faster lookups
    let mut block_opts = rocksdb::BlockBasedOptions::default();
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
    opts.set_block_based_table_factory(&block_opts);

    let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
        .iter()
        .map(|name| {
            let mut cf_opts = Options::default();
            cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
            ColumnFamilyDescriptor::new(*name, cf_opts)
        })
        .collect();

    let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
        .map_err(|e| StorageError::io(format!("Failed to open RocksDB: {}", e)))?;

    tracing::info!("[storage] 🗄️ RocksDB opened at {}", config.path.display());
    Ok(Arc::new(db))
}

/// One logical store: a handle to a single column family.
pub struct RocksDbStore {
    db: Arc<DB>,
    cf: &'static str,
    sync_writes: bool,
}

impl RocksDbStore {
    /// Binds a handle to `cf`. Fails if the column family was not opened.
    pub fn new(db: Arc<DB>, cf: &'static str, sync_writes: bool) -> Result<Self, StorageError> {
        if db.cf_handle(cf).is_none() {
            return Err(StorageError::io(format!("Missing column family: {}", cf)));
        }
        Ok(Self {
            db,
            cf,
            sync_writes,
        })
    }

    /// Opens a database at `path` and returns the three logical stores.
    pub fn open_all(
        path: impl AsRef<Path>,
    ) -> Result<(RocksDbStore, RocksDbStore, RocksDbStore), StorageError> {
        let config = RocksDbConfig {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        };
        let db = open_database(&config)?;
        Ok((
            Self::new(db.clone(), CF_PARTICIPANTS, config.sync_writes)?,
            Self::new(db.clone(), CF_PRODUCTS, config.sync_writes)?,
            Self::new(db, CF_MILESTONES, config.sync_writes)?,
        ))
    }

    /// Column family this handle reads and writes.
    pub fn column_family(&self) -> &'static str {
        self.cf
    }

    fn handle(&self) -> Result<&rocksdb::ColumnFamily, StorageError> {
        self.db
            .cf_handle(self.cf)
            .ok_or_else(|| StorageError::io(format!("Missing column family: {}", self.cf)))
    }

    fn write_opts(&self) -> rocksdb::WriteOptions {
        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.db
            .get_cf(self.handle()?, key)
            .map_err(|e| StorageError::io(format!("RocksDB get failed: {}", e)))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.db
            .put_cf_opt(self.handle()?, key, value, &self.write_opts())
            .map_err(|e| StorageError::io(format!("RocksDB put failed: {}", e)))
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        let cf = self.handle()?;
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put_cf(cf, &key, &value),
            }
        }

        self.db
            .write_opt(batch, &self.write_opts())
            .map_err(|e| StorageError::io(format!("RocksDB batch write failed: {}", e)))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        let iter = self
            .db
            .iterator_cf(self.handle()?, IteratorMode::From(prefix, Direction::Forward));

        let mut results = Vec::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| StorageError::io(format!("RocksDB scan failed: {}", e)))?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }
        Ok(results)
    }
}
