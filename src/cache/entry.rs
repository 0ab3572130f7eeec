//! Cache Entry Module
//!
//! Defines the versioned, TTL-bound entry shared by the memory and durable layers.

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value with its write time, lifetime and schema version.
///
/// Serialized with camelCase field names; `userId` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,
    /// Write time (Unix milliseconds)
    pub timestamp: u64,
    /// Lifetime in milliseconds
    pub ttl: u64,
    /// Version the entry was written under
    pub version: String,
    /// Owner of the entry, if it is user-scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry written at `now_ms`.
    pub fn new(data: T, now_ms: u64, ttl_ms: u64, version: impl Into<String>) -> Self {
        Self {
            data,
            timestamp: now_ms,
            ttl: ttl_ms,
            version: version.into(),
            user_id: None,
        }
    }

    /// Tags the entry with an owning user.
    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    // == Expiry ==
    /// Returns the expiration timestamp in milliseconds.
    pub fn expires_at(&self) -> u64 {
        self.timestamp.saturating_add(self.ttl)
    }

    /// An entry is expired once `now >= timestamp + ttl`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Validity ==
    /// Valid iff not expired and written under `expected_version`.
    pub fn is_valid(&self, now_ms: u64, expected_version: &str) -> bool {
        !self.is_expired(now_ms) && self.version == expected_version
    }

    /// True when the entry is tagged with exactly `user_id`.
    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(true, 1_000, 500, "1.0.0");

        assert!(entry.data);
        assert_eq!(entry.timestamp, 1_000);
        assert_eq!(entry.expires_at(), 1_500);
        assert!(entry.user_id.is_none());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("x", 1_000, 500, "1.0.0");

        assert!(!entry.is_expired(1_499));
        assert!(entry.is_expired(1_500), "Entry should be expired at boundary");
    }

    #[test]
    fn test_validity_requires_matching_version() {
        let entry = CacheEntry::new(1u32, 0, 1_000, "1.0.0");

        assert!(entry.is_valid(10, "1.0.0"));
        assert!(!entry.is_valid(10, "2.0.0"));
        assert!(!entry.is_valid(1_000, "1.0.0"));
    }

    #[test]
    fn test_belongs_to() {
        let entry = CacheEntry::new(true, 0, 1_000, "v").with_user(Some("u1".to_string()));

        assert!(entry.belongs_to("u1"));
        assert!(!entry.belongs_to("u10"));
        assert!(!CacheEntry::new(true, 0, 1_000, "v").belongs_to("u1"));
    }

    #[test]
    fn test_json_layout() {
        let entry = CacheEntry::new(true, 5, 10, "1.0.0").with_user(Some("u1".to_string()));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["data"], true);
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["version"], "1.0.0");

        let anonymous = serde_json::to_string(&CacheEntry::new(false, 5, 10, "v")).unwrap();
        assert!(!anonymous.contains("userId"));
    }

    #[test]
    fn test_json_missing_user_id_deserializes() {
        let raw = r#"{"data":["admin"],"timestamp":1,"ttl":2,"version":"v"}"#;
        let entry: CacheEntry<Vec<String>> = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.data, vec!["admin".to_string()]);
        assert!(entry.user_id.is_none());
    }
}
