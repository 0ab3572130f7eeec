//! Memory Cache Module
//!
//! Bounded in-memory map with per-entry TTL checked on read and FIFO eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::clock::Clock;

// == Memory Cache ==
/// Bounded, insertion-ordered cache of `CacheEntry<T>`.
///
/// When full, inserting a new key evicts the oldest inserted key. Reads do
/// not reorder keys, so this approximates LRU without tracking access.
#[derive(Debug)]
pub struct MemoryCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion order for eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Time source for TTL checks
    clock: Arc<dyn Clock>,
}

impl<T> MemoryCache<T> {
    // == Constructor ==
    /// Creates a new MemoryCache. A capacity of 0 is treated as 1.
    pub fn new(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            clock,
        }
    }

    // == Get ==
    /// Returns the entry for `key`, or None if absent.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry<T>> {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            debug!(key, "memory cache entry expired");
            self.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key)
    }

    // == Set ==
    /// Stores an entry, returning the key evicted to make room, if any.
    ///
    /// Overwriting an existing key keeps its insertion position.
    pub fn set(&mut self, key: impl Into<String>, entry: CacheEntry<T>) -> Option<String> {
        let key = key.into();
        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.order.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                debug!(key = %oldest, "memory cache evicted oldest entry");
                evicted = Some(oldest);
            }
        }

        self.order.insert(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Remove ==
    /// Removes an entry by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry<T>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Retain ==
    /// Keeps only entries for which `keep` returns true.
    ///
    /// Returns the keys that were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str, &CacheEntry<T>) -> bool,
    {
        let doomed: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| !keep(key.as_str(), entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning their keys.
    pub fn cleanup_expired(&mut self) -> Vec<String> {
        let now = self.clock.now_ms();
        let expired = self.retain(|_, entry| !entry.is_expired(now));
        self.stats.record_expirations(expired.len());
        expired
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
