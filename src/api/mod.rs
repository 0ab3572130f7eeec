//! API Module
//!
//! HTTP handlers and routing exposing the RBAC cache to local services.
//!
//! # Endpoints
//! - `PUT /permissions`, `GET /permissions/:key?userId=` - Permission checks
//! - `PUT /endpoints`, `GET /endpoints/:key` - Endpoint configs
//! - `PUT /roles/:user_id`, `GET /roles/:user_id` - User roles
//! - `DELETE /users/:user_id` - Invalidate everything cached for a user
//! - `PUT /versions/:domain` - Change a domain's cache version
//! - `DELETE /cache` - Clear both layers
//! - `POST /cleanup` - Remove stale entries now
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
