//! # Data Directory Lock
//!
//! Prevents two nodes from opening the same data directory. Uses `fs2` for
//! cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from data directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    /// Directory is already locked by another process.
    #[error("Data directory already in use{} ({})", .pid.map(|p| format!(" by process {}", p)).unwrap_or_default(), .path.display())]
    AlreadyLocked {
        /// PID recorded by the holder, if readable.
        pid: Option<u32>,
        /// Lock file path.
        path: PathBuf,
    },

    /// Failed to write PID to lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Exclusive lock on a data directory.
///
/// Acquired on startup, released on drop.
pub struct DatabaseLock {
    /// Kept open to hold the lock.
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DatabaseLock {
    /// Lock file name
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire an exclusive lock on `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if another holder has the lock.
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        std::fs::create_dir_all(data_dir).map_err(LockError::CreateFailed)?;
        let lock_path = data_dir.join(Self::LOCK_FILE);

        // No truncate here: the current holder's PID must survive a failed attempt.
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(file, "{}", pid).map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;

        tracing::info!("[storage] 🔒 Locked {}", lock_path.display());
        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    /// PID of the process holding the lock.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DatabaseLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lock_acquire_and_release() {
        let dir = tempdir().unwrap();
        let lock = DatabaseLock::acquire(dir.path()).unwrap();
        assert_eq!(lock.pid(), std::process::id());
        assert!(lock.path().exists());

        drop(lock);
        assert!(!dir.path().join("LOCK").exists());
    }

    #[test]
    fn test_second_lock_rejected() {
        let dir = tempdir().unwrap();
        let _held = DatabaseLock::acquire(dir.path()).unwrap();

        match DatabaseLock::acquire(dir.path()) {
            Err(LockError::AlreadyLocked { pid, .. }) => {
                assert_eq!(pid, Some(std::process::id()));
            }
            other => panic!("expected AlreadyLocked, got {:?}", other.map(|l| l.pid())),
        }
    }

    #[test]
    fn test_relock_after_release() {
        let dir = tempdir().unwrap();
        drop(DatabaseLock::acquire(dir.path()).unwrap());
        assert!(DatabaseLock::acquire(dir.path()).is_ok());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let lock = DatabaseLock::acquire(&nested).unwrap();
        assert!(lock.path().starts_with(&nested));
    }
}
