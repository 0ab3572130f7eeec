//! RBAC cache statistics

use serde::Serialize;

use crate::cache::CacheStats;

// == Counters ==
/// Façade-level counters, updated on every lookup and write.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    pub memory_hits: u64,
    pub storage_hits: u64,
    pub misses: u64,
    pub dropped_writes: u64,
    pub quota_purges: u64,
}

// == RBAC Cache Stats ==
/// Snapshot of cache performance across both layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RbacCacheStats {
    /// Lookups answered from either layer
    pub hits: u64,
    pub memory_hits: u64,
    pub storage_hits: u64,
    pub misses: u64,
    /// Memory entries evicted for capacity
    pub evictions: u64,
    /// Memory entries dropped after their TTL
    pub expirations: u64,
    pub memory_entries: usize,
    pub storage_entries: usize,
    /// Durable writes given up on
    pub dropped_writes: u64,
    /// Times the oldest quarter of the durable store was purged
    pub quota_purges: u64,
    pub hit_rate: f64,
}

impl RbacCacheStats {
    pub(crate) fn build(counters: &Counters, memory: &CacheStats, storage_entries: usize) -> Self {
        let hits = counters.memory_hits + counters.storage_hits;
        let total = hits + counters.misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        Self {
            hits,
            memory_hits: counters.memory_hits,
            storage_hits: counters.storage_hits,
            misses: counters.misses,
            evictions: memory.evictions,
            expirations: memory.expirations,
            memory_entries: memory.total_entries,
            storage_entries,
            dropped_writes: counters.dropped_writes,
            quota_purges: counters.quota_purges,
            hit_rate,
        }
    }
}
