//! In-memory durable store
//!
//! Keeps values in a HashMap. Used when no storage file is configured and as
//! the working set behind `FileStorage`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::{entry_size, DurableStore, StoredValue};

// == Memory Storage ==
/// Process-local store with an optional byte quota.
#[derive(Debug)]
pub struct MemoryStorage {
    values: HashMap<String, StoredValue>,
    /// Maximum bytes of keys plus values, None = unbounded
    quota_bytes: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl MemoryStorage {
    // == Constructor ==
    pub fn new(quota_bytes: Option<usize>, clock: Arc<dyn Clock>) -> Self {
        Self::from_values(HashMap::new(), quota_bytes, clock)
    }

    /// Creates a store pre-populated with `values`.
    pub fn from_values(
        values: HashMap<String, StoredValue>,
        quota_bytes: Option<usize>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            values,
            quota_bytes,
            clock,
        }
    }

    /// Raw view of the stored values, expired ones included.
    pub fn values(&self) -> &HashMap<String, StoredValue> {
        &self.values
    }

    /// Bytes currently charged against the quota.
    pub fn used_bytes(&self) -> usize {
        self.values
            .iter()
            .map(|(key, stored)| entry_size(key, &stored.value))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Puts back a raw value previously read from `values`, or removes the
    /// key when there was none.
    pub fn restore(&mut self, key: &str, previous: Option<StoredValue>) {
        match previous {
            Some(stored) => {
                self.values.insert(key.to_string(), stored);
            }
            None => {
                self.values.remove(key);
            }
        }
    }

    // == Prune ==
    /// Drops every expired value, returning how many were dropped.
    pub fn prune_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.values.len();
        self.values.retain(|_, stored| !stored.is_expired(now));
        before - self.values.len()
    }
}

impl DurableStore for MemoryStorage {
    fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();
        if self.values.get(key)?.is_expired(now) {
            self.values.remove(key);
            return None;
        }
        self.values.get(key).map(|stored| stored.value.clone())
    }

    fn set(&mut self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            self.prune_expired();
            let replaced = self
                .values
                .get(key)
                .map(|stored| entry_size(key, &stored.value))
                .unwrap_or(0);
            let needed = self.used_bytes() - replaced + entry_size(key, &value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        let stored = StoredValue::new(value, self.clock.now_ms(), ttl_ms);
        self.values.insert(key.to_string(), stored);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn keys(&mut self) -> Vec<String> {
        self.prune_expired();
        self.values.keys().cloned().collect()
    }
}
