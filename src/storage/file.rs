//! File-backed durable store
//!
//! Persists all values as one JSON object. The file is read once on open and
//! rewritten (via a temporary file and rename) after every mutation.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::{DurableStore, MemoryStorage, StoredValue};

// == File Storage ==
/// Store that survives process restarts.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    inner: MemoryStorage,
}

impl FileStorage {
    // == Open ==
    /// Opens the store at `path`, creating it lazily on first write.
    ///
    /// A file that cannot be parsed is discarded and the store starts empty.
    pub fn open(
        path: impl Into<PathBuf>,
        quota_bytes: Option<usize>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, StoredValue>>(&bytes) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable storage file");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), entries = values.len(), "opened storage file");
        Ok(Self {
            path,
            inner: MemoryStorage::from_values(values, quota_bytes, clock),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Persist ==
    /// Writes the current values to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(self.inner.values())?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn flush_or_warn(&self) {
        if let Err(e) = self.flush() {
            warn!(path = %self.path.display(), error = %e, "failed to persist storage file");
        }
    }
}

impl DurableStore for FileStorage {
    fn get(&mut self, key: &str) -> Option<String> {
        let before = self.inner.len();
        let value = self.inner.get(key);
        if self.inner.len() != before {
            self.flush_or_warn();
        }
        value
    }

    /// A write that cannot be flushed is rolled back before the error is
    /// returned.
    fn set(&mut self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<(), StorageError> {
        let previous = self.inner.values().get(key).cloned();
        self.inner.set(key, value, ttl_ms)?;
        if let Err(e) = self.flush() {
            self.inner.restore(key, previous);
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        let before = self.inner.len();
        self.inner.remove(key);
        if self.inner.len() != before {
            self.flush_or_warn();
        }
    }

    fn keys(&mut self) -> Vec<String> {
        if self.inner.prune_expired() > 0 {
            self.flush_or_warn();
        }
        self.inner.keys()
    }
}
