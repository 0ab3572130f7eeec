//! API Handlers
//!
//! HTTP request handlers for each RBAC cache endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{CacheError, Result};
use crate::models::{
    validate_path_key, ClearResponse, EndpointResponse, HealthResponse, InvalidateUserResponse,
    PermissionQuery, PermissionResponse, RolesResponse, SetEndpointRequest, SetPermissionRequest,
    SetResponse, SetRolesRequest, SetVersionRequest, VersionResponse,
};
use crate::rbac::{CacheDomain, RbacCacheStats, RbacPersistentCache};

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<RbacPersistentCache>>,
}

impl AppState {
    /// Creates a new AppState owning the given cache.
    pub fn new(cache: RbacPersistentCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(RbacPersistentCache::from_config(config))
    }
}

fn check(error: Option<String>) -> Result<()> {
    match error {
        Some(msg) => Err(CacheError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /permissions
pub async fn set_permission_handler(
    State(state): State<AppState>,
    Json(req): Json<SetPermissionRequest>,
) -> Result<Json<SetResponse>> {
    check(req.validate())?;

    let mut cache = state.cache.write().await;
    cache.cache_permission_check(&req.key, req.allowed, req.user_id.as_deref());

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /permissions/:key
pub async fn get_permission_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<PermissionQuery>,
) -> Result<Json<PermissionResponse>> {
    // Write lock: reads may promote, expire or purge entries
    let mut cache = state.cache.write().await;
    let allowed = cache
        .get_cached_permission_check(&key, query.user_id.as_deref())
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(PermissionResponse::new(key, allowed, query.user_id)))
}

/// Handler for PUT /endpoints
pub async fn set_endpoint_handler(
    State(state): State<AppState>,
    Json(req): Json<SetEndpointRequest>,
) -> Result<Json<SetResponse>> {
    check(req.validate())?;

    let mut cache = state.cache.write().await;
    cache.cache_endpoint_config(&req.key, req.config);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /endpoints/:key
pub async fn get_endpoint_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EndpointResponse>> {
    let mut cache = state.cache.write().await;
    let config = cache
        .get_cached_endpoint_config(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(EndpointResponse::new(key, config)))
}

/// Handler for PUT /roles/:user_id
pub async fn set_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SetRolesRequest>,
) -> Result<Json<SetResponse>> {
    check(validate_path_key("User id", &user_id))?;
    check(req.validate())?;

    let mut cache = state.cache.write().await;
    cache.cache_user_roles(&user_id, req.roles);

    Ok(Json(SetResponse::new(user_id)))
}

/// Handler for GET /roles/:user_id
pub async fn get_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RolesResponse>> {
    let mut cache = state.cache.write().await;
    let roles = cache
        .get_cached_user_roles(&user_id)
        .ok_or_else(|| CacheError::NotFound(user_id.clone()))?;

    Ok(Json(RolesResponse::new(user_id, roles)))
}

/// Handler for DELETE /users/:user_id
pub async fn invalidate_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<InvalidateUserResponse>> {
    check(validate_path_key("User id", &user_id))?;

    let mut cache = state.cache.write().await;
    let removed = cache.invalidate_user_cache(&user_id);

    Ok(Json(InvalidateUserResponse { user_id, removed }))
}

/// Handler for PUT /versions/:domain
pub async fn set_version_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(req): Json<SetVersionRequest>,
) -> Result<Json<VersionResponse>> {
    let parsed: CacheDomain = domain.parse().map_err(CacheError::InvalidRequest)?;
    check(req.validate())?;

    let mut cache = state.cache.write().await;
    cache.set_version(parsed, req.version.clone());

    Ok(Json(VersionResponse {
        domain: parsed.to_string(),
        version: req.version,
    }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear_all_cache();

    Json(ClearResponse::cleared())
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.cleanup_expired();

    Json(ClearResponse::cleaned(removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<RbacCacheStats> {
    // Counting durable keys lets the store prune, so this needs the write lock
    let mut cache = state.cache.write().await;
    Json(cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
