//! Cache Module
//!
//! Provides the bounded in-memory layer with TTL expiration and FIFO eviction.

mod entry;
mod memory;
mod order;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use order::InsertionOrder;
pub use stats::CacheStats;
