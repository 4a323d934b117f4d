use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::trace;

use crate::db::error::{Result, StorageError};

/// Whole-file advisory exclusive lock on a table's row file.
///
/// The guard owns the open handle. Dropping it releases the lock and then
/// closes the file, so every exit path of a command unlocks.
#[derive(Debug)]
pub struct TableLock {
    file: File,
    path: PathBuf,
}

impl TableLock {
    /// Opens `path` and blocks until the exclusive lock is granted.
    pub fn acquire(path: &Path, writable: bool) -> Result<Self> {
        let file = open(path, writable)?;
        file.lock_exclusive().map_err(|source| StorageError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), "acquired table lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Like [`TableLock::acquire`] but fails with [`StorageError::Lock`]
    /// instead of waiting when another handle holds the lock.
    pub fn try_acquire(path: &Path, writable: bool) -> Result<Self> {
        let file = open(path, writable)?;
        file.try_lock_exclusive().map_err(|source| StorageError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), "acquired table lock without waiting");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TableLock {
    fn drop(&mut self) {
        // The kernel drops the lock with the descriptor anyway.
        let _ = FileExt::unlock(&self.file);
        trace!(path = %self.path.display(), "released table lock");
    }
}

fn open(path: &Path, writable: bool) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(writable)
        .open(path)
        .map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })
}
