//! Stride Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing the full router to be built for tests as well as the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod cosmic;
pub mod error;
pub mod filters;
pub mod imgix;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Build the complete storefront application.
///
/// Assembles routes, the session layer, and the middleware stack. The
/// Sentry tower layers are added by the binary so tests run without an
/// error-tracking transport.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
