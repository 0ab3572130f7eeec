//! RBAC Cache - Permission lookup cache with a durable fallback
//!
//! Caches permission checks, endpoint configs and user roles in memory with
//! per-domain TTLs and versions, backed by a durable key-value store.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod rbac;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use rbac::{CacheDomain, EndpointConfig, RbacPersistentCache};
pub use tasks::spawn_cleanup_task;
