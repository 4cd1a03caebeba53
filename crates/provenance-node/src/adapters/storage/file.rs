//! # File-Backed Store
//!
//! Durable `KeyValueStore` without a RocksDB build. The whole logical store is
//! held in memory and rewritten as one checksummed snapshot after every write.
//!
//! Snapshot format:
//!
//! ```text
//! [magic "PCKV"][crc32 of body: u32 LE][body]
//! body = ([key_len: u32 LE][key][value_len: u32 LE][value])*
//! ```
//!
//! A snapshot that fails the magic, checksum, or framing check is reported as
//! `StorageError::Corrupted` on open. It is never silently discarded.

use shared_types::errors::StorageError;
use shared_types::storage::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"PCKV";
const HEADER_LEN: usize = MAGIC.len() + 4;

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// File-backed key-value store.
pub struct FileBackedKVStore {
    data: Entries,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Opens the snapshot at `path`, starting empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let data = match File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)
                    .map_err(|e| StorageError::io(format!("{}: {}", path.display(), e)))?;
                let data = decode_snapshot(&bytes).map_err(|message| {
                    StorageError::corrupted(format!("{}: {}", path.display(), message))
                })?;
                tracing::info!(
                    "[storage] 💾 Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[storage] 📁 No existing snapshot at {}", path.display());
                Entries::new()
            }
            Err(e) => {
                return Err(StorageError::io(format!("{}: {}", path.display(), e)));
            }
        };

        Ok(Self { data, path })
    }

    /// Snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Persists `next` and only then makes it the live map.
    fn commit(&mut self, next: Entries) -> Result<(), StorageError> {
        save_snapshot(&self.path, &next)?;
        self.data = next;
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        let mut next = self.data.clone();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    next.insert(key, value);
                }
            }
        }
        self.commit(next)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

fn encode_snapshot(data: &Entries) -> Vec<u8> {
    let mut body = Vec::new();
    for (key, value) in data {
        body.extend_from_slice(&(key.len() as u32).to_le_bytes());
        body.extend_from_slice(key);
        body.extend_from_slice(&(value.len() as u32).to_le_bytes());
        body.extend_from_slice(value);
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

fn decode_snapshot(bytes: &[u8]) -> Result<Entries, String> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err("missing snapshot header".to_string());
    }
    let expected = read_u32(bytes, MAGIC.len()).ok_or("truncated checksum")?;
    let body = &bytes[HEADER_LEN..];
    let actual = crc32fast::hash(body);
    if actual != expected {
        return Err(format!(
            "checksum mismatch (expected {:08x}, got {:08x})",
            expected, actual
        ));
    }

    let mut data = Entries::new();
    let mut cursor = 0;
    while cursor < body.len() {
        let key = read_chunk(body, &mut cursor).ok_or("truncated key")?;
        let value = read_chunk(body, &mut cursor).ok_or("truncated value")?;
        data.insert(key, value);
    }
    Ok(data)
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

fn read_chunk(body: &[u8], cursor: &mut usize) -> Option<Vec<u8>> {
    let len = read_u32(body, *cursor)? as usize;
    let start = *cursor + 4;
    let chunk = body.get(start..start.checked_add(len)?)?.to_vec();
    *cursor = start + len;
    Some(chunk)
}

fn save_snapshot(path: &Path, data: &Entries) -> Result<(), StorageError> {
    let io_err = |e: std::io::Error| StorageError::io(format!("{}: {}", path.display(), e));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path).map_err(io_err)?;
    file.write_all(&encode_snapshot(data)).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)?;

    Ok(())
}
