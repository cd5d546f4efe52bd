use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// GET /healthz
/// Liveness probe; also advertises that the protocol endpoint is mounted.
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "ok": true, "mcp": true }))
}
