pub mod health;
pub mod rest;

use axum::{
    routing::{get, post},
    Router,
};

use crate::mcp::handlers::{handle_mcp, handle_mcp_stream};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/healthz", get(health::healthz_handler))
        // REST shim
        .route("/chat", post(rest::handle_chat))
        .route("/email/send", post(rest::handle_email_send))
        // Protocol endpoint
        .route("/mcp", post(handle_mcp).get(handle_mcp_stream))
        .with_state(state)
}
