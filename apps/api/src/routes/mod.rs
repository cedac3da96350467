//! HTTP route assembly.
//!
//! Product routes are versioned under `/api/v1`; health and the root banner
//! sit at the top level. Middleware applied here:
//!
//! - request tracing (tower-http `TraceLayer`)
//! - permissive CORS
//! - a request-level timeout

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod health;
pub mod products;

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/v1", products::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
