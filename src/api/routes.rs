//! API Routes
//!
//! Configures the Axum router with all RBAC cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, get_endpoint_handler, get_permission_handler,
    get_roles_handler, health_handler, invalidate_user_handler, set_endpoint_handler,
    set_permission_handler, set_roles_handler, set_version_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/permissions", put(set_permission_handler))
        .route("/permissions/:key", get(get_permission_handler))
        .route("/endpoints", put(set_endpoint_handler))
        .route("/endpoints/:key", get(get_endpoint_handler))
        .route("/roles/:user_id", put(set_roles_handler).get(get_roles_handler))
        .route("/users/:user_id", delete(invalidate_user_handler))
        .route("/versions/:domain", put(set_version_handler))
        .route("/cache", delete(clear_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::from_config(&Config::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_permission_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/permissions")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"users:read","allowed":true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_permission_not_cached() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/permissions/users:read")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_version_domain() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/versions/sessions")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"version":"2.0.0"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
