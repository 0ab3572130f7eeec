//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default schema version stamped on new entries.
pub const DEFAULT_CACHE_VERSION: &str = "1.0.0";

// == Domain Settings ==
/// Lifetime and version of one logical cache domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSettings {
    /// TTL in seconds
    pub ttl: u64,
    /// Version entries must carry to be valid
    pub version: String,
}

impl DomainSettings {
    pub fn new(ttl: u64, version: impl Into<String>) -> Self {
        Self {
            ttl,
            version: version.into(),
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl.saturating_mul(1000)
    }
}

// == Cache Settings ==
/// Settings of the RBAC cache façade.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Capacity of each memory cache
    pub memory_max_entries: usize,
    pub permissions: DomainSettings,
    pub endpoints: DomainSettings,
    pub user_roles: DomainSettings,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            memory_max_entries: 1000,
            permissions: DomainSettings::new(300, DEFAULT_CACHE_VERSION),
            endpoints: DomainSettings::new(1800, DEFAULT_CACHE_VERSION),
            user_roles: DomainSettings::new(600, DEFAULT_CACHE_VERSION),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache: CacheSettings,
    /// JSON file backing the durable store; in-memory when unset
    pub storage_path: Option<PathBuf>,
    /// Durable store quota in bytes
    pub storage_quota_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Probability in [0, 1] that a cleanup tick is skipped
    pub cleanup_skip_probability: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMORY_MAX_ENTRIES` - Capacity of each memory cache (default: 1000)
    /// - `PERMISSION_TTL` - Permission check TTL in seconds (default: 300)
    /// - `ENDPOINT_TTL` - Endpoint config TTL in seconds (default: 1800)
    /// - `USER_ROLES_TTL` - User roles TTL in seconds (default: 600)
    /// - `CACHE_VERSION` - Initial version of every domain (default: 1.0.0)
    /// - `STORAGE_PATH` - Storage file path (default: unset, in-memory)
    /// - `STORAGE_QUOTA_BYTES` - Storage quota (default: 5 MiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 300)
    /// - `CLEANUP_SKIP_PROBABILITY` - Chance to skip a cleanup tick (default: 0.1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let version = env::var("CACHE_VERSION")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CACHE_VERSION.to_string());

        let cache = CacheSettings {
            memory_max_entries: parse_env("MEMORY_MAX_ENTRIES", defaults.cache.memory_max_entries),
            permissions: DomainSettings::new(
                parse_env("PERMISSION_TTL", defaults.cache.permissions.ttl),
                version.clone(),
            ),
            endpoints: DomainSettings::new(
                parse_env("ENDPOINT_TTL", defaults.cache.endpoints.ttl),
                version.clone(),
            ),
            user_roles: DomainSettings::new(
                parse_env("USER_ROLES_TTL", defaults.cache.user_roles.ttl),
                version,
            ),
        };

        Self {
            cache,
            storage_path: env::var("STORAGE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            storage_quota_bytes: parse_env("STORAGE_QUOTA_BYTES", defaults.storage_quota_bytes),
            server_port: parse_env("SERVER_PORT", defaults.server_port),
            cleanup_interval: parse_env("CLEANUP_INTERVAL", defaults.cleanup_interval),
            cleanup_skip_probability: parse_env(
                "CLEANUP_SKIP_PROBABILITY",
                defaults.cleanup_skip_probability,
            )
            .clamp(0.0, 1.0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            storage_path: None,
            storage_quota_bytes: 5 * 1024 * 1024,
            server_port: 3000,
            cleanup_interval: 300,
            cleanup_skip_probability: 0.1,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.memory_max_entries, 1000);
        assert_eq!(config.cache.permissions.ttl, 300);
        assert_eq!(config.cache.endpoints.ttl, 1800);
        assert_eq!(config.cache.user_roles.ttl, 600);
        assert_eq!(config.cache.permissions.version, DEFAULT_CACHE_VERSION);
        assert!(config.storage_path.is_none());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 300);
        assert_eq!(config.cleanup_skip_probability, 0.1);
    }

    #[test]
    fn test_domain_ttl_ms() {
        assert_eq!(DomainSettings::new(5, "v").ttl_ms(), 5_000);
    }

    #[test]
    fn test_config_from_env() {
        // All env manipulation lives in this one test to avoid races between tests
        env::remove_var("MEMORY_MAX_ENTRIES");
        env::remove_var("PERMISSION_TTL");
        env::remove_var("ENDPOINT_TTL");
        env::remove_var("USER_ROLES_TTL");
        env::remove_var("CACHE_VERSION");
        env::remove_var("STORAGE_PATH");
        env::remove_var("STORAGE_QUOTA_BYTES");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CLEANUP_SKIP_PROBABILITY");

        let config = Config::from_env();
        assert_eq!(config.cache, CacheSettings::default());
        assert_eq!(config.server_port, 3000);

        env::set_var("PERMISSION_TTL", "60");
        env::set_var("CACHE_VERSION", "2.1.0");
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("CLEANUP_SKIP_PROBABILITY", "7");
        env::set_var("STORAGE_PATH", "/tmp/rbac-cache.json");

        let config = Config::from_env();
        assert_eq!(config.cache.permissions.ttl, 60);
        assert_eq!(config.cache.user_roles.version, "2.1.0");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_skip_probability, 1.0);
        assert_eq!(
            config.storage_path,
            Some(PathBuf::from("/tmp/rbac-cache.json"))
        );

        env::remove_var("PERMISSION_TTL");
        env::remove_var("CACHE_VERSION");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_SKIP_PROBABILITY");
        env::remove_var("STORAGE_PATH");
    }
}
