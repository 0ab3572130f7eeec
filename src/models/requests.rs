//! Request DTOs for the RBAC cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::rbac::EndpointConfig;

/// Maximum allowed key or user id length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

fn validate_key(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for PUT /permissions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPermissionRequest {
    /// Permission check key, e.g. `users:delete`
    pub key: String,
    /// Result of the check
    pub allowed: bool,
    /// User the result applies to
    #[serde(default)]
    pub user_id: Option<String>,
}

impl SetPermissionRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key("Key", &self.key).or_else(|| {
            self.user_id
                .as_deref()
                .and_then(|user_id| validate_key("User id", user_id))
        })
    }
}

/// Query string for GET /permissions/:key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request body for PUT /endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SetEndpointRequest {
    pub key: String,
    pub config: EndpointConfig,
}

impl SetEndpointRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key("Key", &self.key)
    }
}

/// Request body for PUT /roles/:user_id
#[derive(Debug, Clone, Deserialize)]
pub struct SetRolesRequest {
    pub roles: Vec<String>,
}

impl SetRolesRequest {
    pub fn validate(&self) -> Option<String> {
        if self.roles.iter().any(|role| role.trim().is_empty()) {
            return Some("Roles cannot contain empty names".to_string());
        }
        None
    }
}

/// Request body for PUT /versions/:domain
#[derive(Debug, Clone, Deserialize)]
pub struct SetVersionRequest {
    pub version: String,
}

impl SetVersionRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key("Version", &self.version)
    }
}

/// Validates a key or user id taken from the request path.
pub fn validate_path_key(field: &str, value: &str) -> Option<String> {
    validate_key(field, value)
}
