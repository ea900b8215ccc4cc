//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - The four note endpoints (list, create, update, delete) on `/notes`
//! - A health check on `/health`
//! - JSON error responses carrying a `message`
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation and propagation
//! - Request timeouts
//!
//! Stores are injected through [`AppState`], so the same router runs against
//! PostgreSQL in production and the in-memory backend in tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{build_app, AppState, ServerConfig};
//! use notes_store::Repository;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(Repository::in_memory(), config);
//! let app = build_app(state)?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

// Re-exports for convenience
pub use config::{ConfigError, DeleteLookup, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the router with the full middleware stack.
///
/// Used by the binary and by the integration tests, so both exercise the
/// same layers.
pub fn build_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.config().cors_allowed_origins)?;
    let timeout = Duration::from_secs(state.config().request_timeout_secs);
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Ok(routes::build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors))
}

/// Build CORS layer from configuration.
///
/// Accepts `*` or a comma-separated list of origins.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    if allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|_| ConfigError::InvalidValue {
                name: "CORS_ALLOWED_ORIGINS".to_string(),
                reason: format!("invalid origin '{}'", s),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
