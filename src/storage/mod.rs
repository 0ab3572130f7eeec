//! Durable Storage Module
//!
//! Key-value backing stores for the RBAC cache. Values are opaque strings,
//! optionally written with a TTL that the store prunes on its own.
//!
//! # Stores
//! - `MemoryStorage`: process-local map with a byte quota
//! - `FileStorage`: JSON document on disk that survives restarts

mod file;
mod memory;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

// == Durable Store Trait ==
/// Contract of a durable key-value store.
///
/// Expired values are pruned automatically: `get` never returns them and
/// `keys` never lists them.
pub trait DurableStore: Debug + Send + Sync {
    /// Returns the value for `key`, or None if missing or expired.
    fn get(&mut self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, expiring after `ttl_ms` if given.
    fn set(&mut self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<(), StorageError>;

    /// Removes `key` if present.
    fn remove(&mut self, key: &str);

    /// Lists all live keys.
    fn keys(&mut self) -> Vec<String>;
}

// == Stored Value ==
/// A value as held by a store, with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

impl StoredValue {
    pub fn new(value: String, now_ms: u64, ttl_ms: Option<u64>) -> Self {
        Self {
            value,
            expires_at: ttl_ms.map(|ttl| now_ms.saturating_add(ttl)),
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

/// Bytes charged against a quota for one key/value pair.
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
