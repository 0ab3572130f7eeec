//! RBAC Persistent Cache
//!
//! Two-layer cache for permission checks, endpoint configs and user roles.
//! The memory layer answers most lookups; the durable layer lets entries
//! survive restarts. The cache is advisory: every failure is a miss or a
//! dropped write, never an error for the caller.

use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, MemoryCache};
use crate::clock::{system_clock, Clock};
use crate::config::{CacheSettings, Config, DomainSettings};
use crate::rbac::stats::Counters;
use crate::rbac::{CacheDomain, EndpointConfig, RbacCacheStats, STORAGE_KEY_PREFIX};
use crate::storage::{DurableStore, FileStorage, MemoryStorage};

// == Cached Value ==
/// Ties a value type to its domain and memory layer.
trait CachedValue: Clone + Serialize + DeserializeOwned {
    const DOMAIN: CacheDomain;

    fn memory(cache: &mut RbacPersistentCache) -> &mut MemoryCache<Self>;
}

impl CachedValue for bool {
    const DOMAIN: CacheDomain = CacheDomain::Permissions;

    fn memory(cache: &mut RbacPersistentCache) -> &mut MemoryCache<Self> {
        &mut cache.permissions
    }
}

impl CachedValue for EndpointConfig {
    const DOMAIN: CacheDomain = CacheDomain::Endpoints;

    fn memory(cache: &mut RbacPersistentCache) -> &mut MemoryCache<Self> {
        &mut cache.endpoints
    }
}

impl CachedValue for Vec<String> {
    const DOMAIN: CacheDomain = CacheDomain::UserRoles;

    fn memory(cache: &mut RbacPersistentCache) -> &mut MemoryCache<Self> {
        &mut cache.user_roles
    }
}

// == Entry Header ==
/// The fields of a stored entry needed for scans, without its payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryHeader {
    timestamp: u64,
    ttl: u64,
    version: String,
    #[serde(default)]
    user_id: Option<String>,
}

impl EntryHeader {
    fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

enum MemoryLookup<T> {
    Hit(T),
    OtherUser,
    Stale,
    Absent,
}

// == RBAC Persistent Cache ==
/// Memory plus durable-store cache for RBAC lookups.
#[derive(Debug)]
pub struct RbacPersistentCache {
    settings: CacheSettings,
    permissions: MemoryCache<bool>,
    endpoints: MemoryCache<EndpointConfig>,
    user_roles: MemoryCache<Vec<String>>,
    store: Box<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl RbacPersistentCache {
    // == Constructors ==
    /// Creates a cache over the given durable store.
    pub fn new(settings: CacheSettings, store: Box<dyn DurableStore>, clock: Arc<dyn Clock>) -> Self {
        let capacity = settings.memory_max_entries;
        Self {
            permissions: MemoryCache::new(capacity, clock.clone()),
            endpoints: MemoryCache::new(capacity, clock.clone()),
            user_roles: MemoryCache::new(capacity, clock.clone()),
            settings,
            store,
            clock,
            counters: Counters::default(),
        }
    }

    /// Creates a cache backed by the configured storage file, or by memory
    /// when no file is configured or it cannot be opened.
    pub fn from_config(config: &Config) -> Self {
        let clock = system_clock();
        let quota = Some(config.storage_quota_bytes);

        let store: Box<dyn DurableStore> = match &config.storage_path {
            Some(path) => match FileStorage::open(path, quota, clock.clone()) {
                Ok(storage) => Box::new(storage),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "storage file unavailable, using memory storage");
                    Box::new(MemoryStorage::new(quota, clock.clone()))
                }
            },
            None => Box::new(MemoryStorage::new(quota, clock.clone())),
        };

        Self::new(config.cache.clone(), store, clock)
    }

    // == Permission Checks ==
    /// Caches the result of a permission check, optionally scoped to a user.
    pub fn cache_permission_check(&mut self, key: &str, allowed: bool, user_id: Option<&str>) {
        self.write(key, allowed, user_id.map(str::to_string));
    }

    /// Returns a cached permission check.
    ///
    /// When `user_id` is given and the entry belongs to someone else, the
    /// lookup is a miss and the entry is left in place.
    pub fn get_cached_permission_check(&mut self, key: &str, user_id: Option<&str>) -> Option<bool> {
        self.read(key, user_id)
    }

    pub fn invalidate_permission(&mut self, key: &str) -> bool {
        self.invalidate::<bool>(key)
    }

    // == Endpoint Configs ==
    pub fn cache_endpoint_config(&mut self, key: &str, config: EndpointConfig) {
        self.write(key, config, None);
    }

    pub fn get_cached_endpoint_config(&mut self, key: &str) -> Option<EndpointConfig> {
        self.read(key, None)
    }

    pub fn invalidate_endpoint_config(&mut self, key: &str) -> bool {
        self.invalidate::<EndpointConfig>(key)
    }

    // == User Roles ==
    pub fn cache_user_roles(&mut self, user_id: &str, roles: Vec<String>) {
        self.write(user_id, roles, Some(user_id.to_string()));
    }

    pub fn get_cached_user_roles(&mut self, user_id: &str) -> Option<Vec<String>> {
        self.read(user_id, Some(user_id))
    }

    // == Invalidation ==
    /// Removes every entry tagged with `user_id` from both layers.
    ///
    /// Returns the number of distinct entries removed.
    pub fn invalidate_user_cache(&mut self, user_id: &str) -> usize {
        let mut removed: HashSet<String> = HashSet::new();

        removed.extend(
            self.permissions
                .retain(|_, entry| !entry.belongs_to(user_id))
                .iter()
                .map(|key| CacheDomain::Permissions.storage_key(key)),
        );
        removed.extend(
            self.endpoints
                .retain(|_, entry| !entry.belongs_to(user_id))
                .iter()
                .map(|key| CacheDomain::Endpoints.storage_key(key)),
        );
        removed.extend(
            self.user_roles
                .retain(|_, entry| !entry.belongs_to(user_id))
                .iter()
                .map(|key| CacheDomain::UserRoles.storage_key(key)),
        );

        for storage_key in self.prefixed_keys() {
            let owned = self
                .store
                .get(&storage_key)
                .and_then(|raw| EntryHeader::parse(&raw))
                .is_some_and(|header| header.user_id.as_deref() == Some(user_id));
            if owned {
                self.store.remove(&storage_key);
                removed.insert(storage_key);
            } else if removed.contains(&storage_key) {
                // Memory copy was tagged but the durable copy was rewritten or
                // unreadable; drop it so the layers agree.
                self.store.remove(&storage_key);
            }
        }

        info!(user_id, removed = removed.len(), "invalidated user cache");
        removed.len()
    }

    /// Wipes both layers. Durable keys outside the cache prefix are kept.
    pub fn clear_all_cache(&mut self) {
        self.permissions.clear();
        self.endpoints.clear();
        self.user_roles.clear();

        let keys = self.prefixed_keys();
        for key in &keys {
            self.store.remove(key);
        }
        info!(storage_entries = keys.len(), "cleared RBAC cache");
    }

    // == Versioning ==
    /// Changes the version a domain's entries must carry.
    ///
    /// Entries written under any other version become misses.
    pub fn set_version(&mut self, domain: CacheDomain, version: impl Into<String>) {
        let version = version.into();
        let settings = self.domain_settings_mut(domain);
        if settings.version != version {
            info!(%domain, from = %settings.version, to = %version, "cache version changed");
            settings.version = version;
        }
    }

    pub fn version(&self, domain: CacheDomain) -> &str {
        &self.domain_settings(domain).version
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    // == Cleanup ==
    /// Removes expired, outdated and unreadable entries from both layers.
    ///
    /// Returns the number of distinct entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut removed: HashSet<String> = HashSet::new();

        let version = self.settings.permissions.version.clone();
        let mut keys = self.permissions.cleanup_expired();
        keys.extend(self.permissions.retain(|_, e| e.version == version));
        removed.extend(keys.iter().map(|key| CacheDomain::Permissions.storage_key(key)));

        let version = self.settings.endpoints.version.clone();
        let mut keys = self.endpoints.cleanup_expired();
        keys.extend(self.endpoints.retain(|_, e| e.version == version));
        removed.extend(keys.iter().map(|key| CacheDomain::Endpoints.storage_key(key)));

        let version = self.settings.user_roles.version.clone();
        let mut keys = self.user_roles.cleanup_expired();
        keys.extend(self.user_roles.retain(|_, e| e.version == version));
        removed.extend(keys.iter().map(|key| CacheDomain::UserRoles.storage_key(key)));

        for storage_key in self.prefixed_keys() {
            let Some((domain, _)) = CacheDomain::parse_storage_key(&storage_key) else {
                continue;
            };
            let expected = self.domain_settings(domain).version.clone();
            let keep = self
                .store
                .get(&storage_key)
                .and_then(|raw| EntryHeader::parse(&raw))
                .is_some_and(|h| h.version == expected && now < h.timestamp.saturating_add(h.ttl));
            if !keep {
                self.store.remove(&storage_key);
                removed.insert(storage_key);
            }
        }

        removed.len()
    }

    // == Stats ==
    pub fn stats(&mut self) -> RbacCacheStats {
        let mut memory = CacheStats::new();
        memory.merge(&self.permissions.stats());
        memory.merge(&self.endpoints.stats());
        memory.merge(&self.user_roles.stats());
        let storage_entries = self.prefixed_keys().len();
        RbacCacheStats::build(&self.counters, &memory, storage_entries)
    }

    // == Internals ==
    fn domain_settings(&self, domain: CacheDomain) -> &DomainSettings {
        match domain {
            CacheDomain::Permissions => &self.settings.permissions,
            CacheDomain::Endpoints => &self.settings.endpoints,
            CacheDomain::UserRoles => &self.settings.user_roles,
        }
    }

    fn domain_settings_mut(&mut self, domain: CacheDomain) -> &mut DomainSettings {
        match domain {
            CacheDomain::Permissions => &mut self.settings.permissions,
            CacheDomain::Endpoints => &mut self.settings.endpoints,
            CacheDomain::UserRoles => &mut self.settings.user_roles,
        }
    }

    fn prefixed_keys(&mut self) -> Vec<String> {
        self.store
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(STORAGE_KEY_PREFIX))
            .collect()
    }

    fn read<T: CachedValue>(&mut self, key: &str, user_id: Option<&str>) -> Option<T> {
        let domain = T::DOMAIN;
        let version = self.domain_settings(domain).version.clone();
        let storage_key = domain.storage_key(key);

        let lookup = match T::memory(self).get(key) {
            Some(entry) if entry.version != version => MemoryLookup::Stale,
            Some(entry) if !user_matches(entry, user_id) => MemoryLookup::OtherUser,
            Some(entry) => MemoryLookup::Hit(entry.data.clone()),
            None => MemoryLookup::Absent,
        };

        match lookup {
            MemoryLookup::Hit(data) => {
                self.counters.memory_hits += 1;
                return Some(data);
            }
            MemoryLookup::OtherUser => {
                debug!(%domain, key, "cached entry belongs to another user");
                self.counters.misses += 1;
                return None;
            }
            MemoryLookup::Stale => {
                debug!(%domain, key, "cached entry has outdated version");
                T::memory(self).remove(key);
                self.store.remove(&storage_key);
                self.counters.misses += 1;
                return None;
            }
            MemoryLookup::Absent => {}
        }

        let Some(raw) = self.store.get(&storage_key) else {
            self.counters.misses += 1;
            return None;
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(%domain, key, error = %e, "discarding unreadable stored entry");
                self.store.remove(&storage_key);
                self.counters.misses += 1;
                return None;
            }
        };

        if !entry.is_valid(self.clock.now_ms(), &version) {
            debug!(%domain, key, "stored entry expired or outdated");
            self.store.remove(&storage_key);
            self.counters.misses += 1;
            return None;
        }

        if !user_matches(&entry, user_id) {
            self.counters.misses += 1;
            return None;
        }

        let data = entry.data.clone();
        T::memory(self).set(key, entry);
        self.counters.storage_hits += 1;
        Some(data)
    }

    fn invalidate<T: CachedValue>(&mut self, key: &str) -> bool {
        let storage_key = T::DOMAIN.storage_key(key);
        let in_memory = T::memory(self).remove(key).is_some();
        let in_store = self.store.get(&storage_key).is_some();
        self.store.remove(&storage_key);
        in_memory || in_store
    }

    fn write<T: CachedValue>(&mut self, key: &str, data: T, user_id: Option<String>) {
        let domain = T::DOMAIN;
        let settings = self.domain_settings(domain);
        let ttl = settings.ttl_ms();
        let entry = CacheEntry::new(data, self.clock.now_ms(), ttl, settings.version.clone())
            .with_user(user_id);

        let payload = serde_json::to_string(&entry);
        T::memory(self).set(key, entry);

        match payload {
            Ok(payload) => self.persist(&domain.storage_key(key), payload, ttl),
            Err(e) => {
                warn!(%domain, key, error = %e, "failed to serialize cache entry");
                self.counters.dropped_writes += 1;
            }
        }
    }

    /// Writes to the durable store, purging the oldest quarter and retrying
    /// once when the quota is exceeded.
    fn persist(&mut self, storage_key: &str, payload: String, ttl: u64) {
        let error = match self.store.set(storage_key, payload.clone(), Some(ttl)) {
            Ok(()) => return,
            Err(e) if e.is_quota_exceeded() => {
                let purged = self.purge_oldest_quarter();
                self.counters.quota_purges += 1;
                debug!(storage_key, purged, "storage quota exceeded, retrying write");
                match self.store.set(storage_key, payload, Some(ttl)) {
                    Ok(()) => return,
                    Err(e) => e,
                }
            }
            Err(e) => e,
        };

        warn!(storage_key, error = %error, "dropping durable cache write");
        self.counters.dropped_writes += 1;
    }

    /// Removes the oldest 25% (at least one) of the cache's durable entries.
    fn purge_oldest_quarter(&mut self) -> usize {
        let mut aged: Vec<(u64, String)> = self
            .prefixed_keys()
            .into_iter()
            .map(|key| {
                let timestamp = self
                    .store
                    .get(&key)
                    .and_then(|raw| EntryHeader::parse(&raw))
                    .map(|h| h.timestamp)
                    .unwrap_or(0);
                (timestamp, key)
            })
            .collect();

        if aged.is_empty() {
            return 0;
        }

        aged.sort();
        let count = aged.len().div_ceil(4);
        for (_, key) in aged.iter().take(count) {
            self.store.remove(key);
        }
        count
    }
}

fn user_matches<T>(entry: &CacheEntry<T>, user_id: Option<&str>) -> bool {
    match user_id {
        Some(user_id) => entry.belongs_to(user_id),
        None => true,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    fn settings() -> CacheSettings {
        CacheSettings {
            memory_max_entries: 100,
            permissions: DomainSettings::new(60, "1.0.0"),
            endpoints: DomainSettings::new(120, "1.0.0"),
            user_roles: DomainSettings::new(90, "1.0.0"),
        }
    }

    fn cache_with_quota(quota: Option<usize>) -> (RbacPersistentCache, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let store = MemoryStorage::new(quota, shared.clone());
        (RbacPersistentCache::new(settings(), Box::new(store), shared), clock)
    }

    fn cache() -> (RbacPersistentCache, ManualClock) {
        cache_with_quota(None)
    }

    fn endpoint() -> EndpointConfig {
        EndpointConfig {
            path: "/api/users".to_string(),
            method: "DELETE".to_string(),
            required_permissions: vec!["users:delete".to_string()],
            required_roles: vec![],
            require_all: false,
        }
    }

    #[test]
    fn test_permission_scoped_to_user() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:delete", true, Some("u1"));

        assert_eq!(cache.get_cached_permission_check("users:delete", Some("u1")), Some(true));
        assert_eq!(cache.get_cached_permission_check("users:delete", Some("u2")), None);
        // The mismatch does not evict the entry
        assert_eq!(cache.get_cached_permission_check("users:delete", Some("u1")), Some(true));
    }

    #[test]
    fn test_permission_without_requested_user_matches_any_owner() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:read", false, Some("u1"));
        assert_eq!(cache.get_cached_permission_check("users:read", None), Some(false));
    }

    #[test]
    fn test_ttl_expiry_purges_both_layers() {
        let (mut cache, clock) = cache();

        cache.cache_permission_check("users:read", true, None);
        clock.advance(59_999);
        assert_eq!(cache.get_cached_permission_check("users:read", None), Some(true));

        clock.advance(1);
        assert_eq!(cache.get_cached_permission_check("users:read", None), None);
        assert_eq!(cache.stats().storage_entries, 0);
    }

    #[test]
    fn test_version_bump_invalidates_domain() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:read", true, None);
        cache.cache_user_roles("u1", vec!["admin".to_string()]);

        cache.set_version(CacheDomain::Permissions, "2.0.0");

        assert_eq!(cache.get_cached_permission_check("users:read", None), None);
        assert_eq!(
            cache.get_cached_user_roles("u1"),
            Some(vec!["admin".to_string()])
        );
        assert_eq!(cache.version(CacheDomain::Permissions), "2.0.0");

        cache.cache_permission_check("users:read", false, None);
        assert_eq!(cache.get_cached_permission_check("users:read", None), Some(false));
    }

    #[test]
    fn test_storage_hit_promotes_into_memory() {
        let (mut cache, _) = cache();

        cache.cache_endpoint_config("DELETE /api/users", endpoint());
        cache.endpoints.clear();

        assert_eq!(cache.get_cached_endpoint_config("DELETE /api/users"), Some(endpoint()));
        assert!(cache.endpoints.contains_key("DELETE /api/users"));

        let stats = cache.stats();
        assert_eq!(stats.storage_hits, 1);
        assert_eq!(stats.memory_hits, 0);
    }

    #[test]
    fn test_corrupt_stored_entry_is_a_miss() {
        let (mut cache, _) = cache();
        let key = CacheDomain::UserRoles.storage_key("u1");
        cache.store.set(&key, "{broken".to_string(), None).unwrap();

        assert_eq!(cache.get_cached_user_roles("u1"), None);
        assert_eq!(cache.store.get(&key), None);
    }

    #[test]
    fn test_invalidate_user_cache_leaves_others() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:delete", true, Some("u1"));
        cache.cache_permission_check("users:read", true, Some("u10"));
        cache.cache_permission_check("health:read", true, None);
        cache.cache_user_roles("u1", vec!["admin".to_string()]);
        cache.cache_user_roles("u10", vec!["viewer".to_string()]);

        // Durable-only entry for u1
        cache.cache_permission_check("audit:read", true, Some("u1"));
        cache.permissions.remove("audit:read");

        let removed = cache.invalidate_user_cache("u1");

        assert_eq!(removed, 3);
        assert_eq!(cache.get_cached_permission_check("users:delete", None), None);
        assert_eq!(cache.get_cached_permission_check("audit:read", None), None);
        assert_eq!(cache.get_cached_user_roles("u1"), None);
        assert_eq!(cache.get_cached_permission_check("users:read", Some("u10")), Some(true));
        assert_eq!(cache.get_cached_permission_check("health:read", None), Some(true));
        assert_eq!(
            cache.get_cached_user_roles("u10"),
            Some(vec!["viewer".to_string()])
        );
    }

    #[test]
    fn test_invalidate_single_keys() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:read", true, None);
        cache.cache_endpoint_config("DELETE /api/users", endpoint());

        assert!(cache.invalidate_permission("users:read"));
        assert!(!cache.invalidate_permission("users:read"));
        assert!(cache.invalidate_endpoint_config("DELETE /api/users"));

        assert_eq!(cache.get_cached_permission_check("users:read", None), None);
        assert_eq!(cache.get_cached_endpoint_config("DELETE /api/users"), None);
    }

    #[test]
    fn test_clear_all_cache_keeps_foreign_keys() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("users:read", true, None);
        cache.cache_user_roles("u1", vec![]);
        cache.store.set("theme", "dark".to_string(), None).unwrap();

        cache.clear_all_cache();

        assert_eq!(cache.get_cached_permission_check("users:read", None), None);
        assert_eq!(cache.get_cached_user_roles("u1"), None);
        assert_eq!(cache.store.get("theme"), Some("dark".to_string()));
        assert_eq!(cache.stats().memory_entries, 0);
    }

    #[test]
    fn test_quota_exceeded_purges_oldest_quarter_and_retries() {
        // Each permission entry takes roughly 100 bytes
        let (mut cache, clock) = cache_with_quota(Some(450));

        for i in 0..4 {
            cache.cache_permission_check(&format!("perm:{i}"), true, None);
            clock.advance(10);
        }
        assert_eq!(cache.stats().storage_entries, 4);

        cache.cache_permission_check("perm:new", true, None);

        let stats = cache.stats();
        assert_eq!(stats.quota_purges, 1);
        assert_eq!(stats.dropped_writes, 0);
        assert!(cache.store.get(&CacheDomain::Permissions.storage_key("perm:0")).is_none());
        assert!(cache.store.get(&CacheDomain::Permissions.storage_key("perm:new")).is_some());
        assert!(cache.store.get(&CacheDomain::Permissions.storage_key("perm:3")).is_some());
    }

    #[test]
    fn test_write_that_never_fits_is_dropped_silently() {
        let (mut cache, _) = cache_with_quota(Some(16));

        cache.cache_user_roles("u1", vec!["admin".to_string()]);

        // Still served from memory
        assert_eq!(cache.get_cached_user_roles("u1"), Some(vec!["admin".to_string()]));
        let stats = cache.stats();
        assert_eq!(stats.dropped_writes, 1);
        assert_eq!(stats.storage_entries, 0);
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl DurableStore for BrokenStore {
        fn get(&mut self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String, _ttl_ms: Option<u64>) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&mut self, _key: &str) {}

        fn keys(&mut self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_storage_failure_is_not_propagated() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));
        let mut cache = RbacPersistentCache::new(settings(), Box::new(BrokenStore), clock);

        cache.cache_permission_check("users:read", true, None);

        assert_eq!(cache.get_cached_permission_check("users:read", None), Some(true));
        let stats = cache.stats();
        assert_eq!(stats.dropped_writes, 1);
        assert_eq!(stats.quota_purges, 0);
    }

    #[test]
    fn test_cleanup_expired_covers_both_layers() {
        let (mut cache, clock) = cache();

        cache.cache_permission_check("users:read", true, None); // 60s
        cache.cache_endpoint_config("DELETE /api/users", endpoint()); // 120s
        cache.cache_user_roles("u1", vec![]); // 90s
        cache.endpoints.clear();

        clock.advance(60_000);
        cache.set_version(CacheDomain::UserRoles, "2.0.0");

        // Expired permission and outdated roles. The roles entry sits in both
        // layers but counts once.
        assert_eq!(cache.cleanup_expired(), 2);

        let stats = cache.stats();
        assert_eq!(stats.memory_entries, 0);
        assert_eq!(stats.storage_entries, 1);
        assert_eq!(cache.get_cached_endpoint_config("DELETE /api/users"), Some(endpoint()));
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let (mut cache, _) = cache();

        cache.cache_permission_check("a", true, None);
        cache.get_cached_permission_check("a", None);
        cache.get_cached_permission_check("b", None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.memory_entries, 1);
        assert_eq!(stats.storage_entries, 1);
    }
}
