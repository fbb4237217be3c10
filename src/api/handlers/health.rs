//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// Basic liveness probe to verify the scaffold is wired correctly.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Backend scaffold ready"
    }))
}
