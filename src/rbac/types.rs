//! RBAC cache domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix of every durable-store key written by the cache.
pub const STORAGE_KEY_PREFIX: &str = "rbac_permissions_cache_";

// == Cache Domain ==
/// Logical namespace of a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDomain {
    /// Boolean results of permission checks
    Permissions,
    /// Access rules of API endpoints
    Endpoints,
    /// Role lists keyed by user id
    UserRoles,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 3] = [
        CacheDomain::Permissions,
        CacheDomain::Endpoints,
        CacheDomain::UserRoles,
    ];

    /// Segment placed between the storage prefix and the caller's key.
    pub fn key_segment(self) -> &'static str {
        match self {
            CacheDomain::Permissions => "perm:",
            CacheDomain::Endpoints => "endpoint:",
            CacheDomain::UserRoles => "roles:",
        }
    }

    /// Full durable-store key for `key` in this domain.
    pub fn storage_key(self, key: &str) -> String {
        format!("{}{}{}", STORAGE_KEY_PREFIX, self.key_segment(), key)
    }

    /// Splits a durable-store key back into its domain and caller key.
    pub fn parse_storage_key(storage_key: &str) -> Option<(CacheDomain, &str)> {
        let rest = storage_key.strip_prefix(STORAGE_KEY_PREFIX)?;
        Self::ALL.into_iter().find_map(|domain| {
            rest.strip_prefix(domain.key_segment())
                .map(|key| (domain, key))
        })
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheDomain::Permissions => "permissions",
            CacheDomain::Endpoints => "endpoints",
            CacheDomain::UserRoles => "roles",
        };
        f.write_str(name)
    }
}

impl FromStr for CacheDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissions" => Ok(CacheDomain::Permissions),
            "endpoints" => Ok(CacheDomain::Endpoints),
            "roles" => Ok(CacheDomain::UserRoles),
            other => Err(format!(
                "Unknown cache domain '{}', expected permissions, endpoints or roles",
                other
            )),
        }
    }
}

// == Endpoint Config ==
/// Cached access rule for an API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub required_permissions: Vec<String>,
    #[serde(default)]
    pub required_roles: Vec<String>,
    /// All requirements must hold rather than any one of them
    #[serde(default)]
    pub require_all: bool,
}
