//! Response DTOs for the RBAC cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::rbac::EndpointConfig;

/// Response body for GET /permissions/:key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub key: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl PermissionResponse {
    pub fn new(key: impl Into<String>, allowed: bool, user_id: Option<String>) -> Self {
        Self {
            key: key.into(),
            allowed,
            user_id,
        }
    }
}

/// Response body for GET /endpoints/:key
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResponse {
    pub key: String,
    pub config: EndpointConfig,
}

impl EndpointResponse {
    pub fn new(key: impl Into<String>, config: EndpointConfig) -> Self {
        Self {
            key: key.into(),
            config,
        }
    }
}

/// Response body for GET /roles/:user_id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesResponse {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl RolesResponse {
    pub fn new(user_id: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
        }
    }
}

/// Response body for every cache write
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was cached
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /users/:user_id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateUserResponse {
    pub user_id: String,
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for PUT /versions/:domain
#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub domain: String,
    pub version: String,
}

/// Response body for DELETE /cache and POST /cleanup
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
            removed: None,
        }
    }

    pub fn cleaned(removed: usize) -> Self {
        Self {
            message: format!("Removed {} stale entries", removed),
            removed: Some(removed),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
