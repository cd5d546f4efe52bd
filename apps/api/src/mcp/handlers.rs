//! Axum handlers for the protocol endpoint.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde_json::Value;
use tokio::task::JoinError;
use tokio_stream::{wrappers::IntervalStream, Stream, StreamExt};
use tracing::error;

use crate::mcp::dispatch::{handle_message, parse_error_response};
use crate::mcp::protocol::{JsonRpcResponse, RpcError, RpcId};
use crate::state::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// POST /mcp
///
/// Dispatch runs on its own task so a panic anywhere inside it is reported
/// as a -32603 envelope instead of dropping the connection.
pub async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("Unparseable protocol body: {e}");
            return Json(parse_error_response()).into_response();
        }
    };

    let id = RpcId::recover(&payload);
    let task = tokio::spawn(async move { handle_message(&state, payload).await });

    match dispatch_outcome(id, task.await) {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Maps the result of the dispatch task onto the reply. A failed task becomes
/// a -32603 envelope carrying the id recovered from the original request.
fn dispatch_outcome(
    id: RpcId,
    joined: Result<Option<JsonRpcResponse>, JoinError>,
) -> Option<JsonRpcResponse> {
    match joined {
        Ok(reply) => reply,
        Err(e) => {
            let message = describe_join_error(e);
            error!("Protocol dispatch failed: {message}");
            Some(JsonRpcResponse::error(id, &RpcError::Internal(message)))
        }
    }
}

fn describe_join_error(e: JoinError) -> String {
    if !e.is_panic() {
        return e.to_string();
    }
    let payload = e.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Dispatch panicked".to_string()
    }
}

/// GET /mcp
///
/// Heartbeat-only event stream. Nothing is ever pushed over it besides the
/// periodic `heartbeat` event.
pub async fn handle_mcp_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let ticks = IntervalStream::new(tokio::time::interval(HEARTBEAT_INTERVAL))
        .map(|_| Ok::<_, Infallible>(Event::default().event("heartbeat").data("{}")));
    Sse::new(ticks).keep_alive(KeepAlive::default())
}
