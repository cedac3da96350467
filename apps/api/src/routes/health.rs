//! Liveness and root endpoints.

use axum::response::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Liveness check for load balancers and monitoring.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /
///
/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Cardfolio API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
