//! Request and Response models for the RBAC cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    validate_path_key, PermissionQuery, SetEndpointRequest, SetPermissionRequest,
    SetRolesRequest, SetVersionRequest, MAX_KEY_LENGTH,
};
pub use responses::{
    ClearResponse, EndpointResponse, HealthResponse, InvalidateUserResponse, PermissionResponse,
    RolesResponse, SetResponse, VersionResponse,
};
