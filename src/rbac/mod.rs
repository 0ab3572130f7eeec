//! RBAC Cache Module
//!
//! Caches permission checks, endpoint configs and user roles across a memory
//! layer and a durable store, with per-domain TTLs and versions.

mod cache;
mod stats;
mod types;

pub use cache::RbacPersistentCache;
pub use stats::RbacCacheStats;
pub use types::{CacheDomain, EndpointConfig, STORAGE_KEY_PREFIX};
