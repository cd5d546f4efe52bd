//! REST shim: direct access to the answer engine and the notification
//! gateway, without the JSON-RPC envelope.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::mailer::MailOutcome;
use crate::mcp::tools::{AskCvInput, AskCvOutput, SendEmailInput};
use crate::state::AppState;

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<AskCvInput>, JsonRejection>,
) -> Result<Json<AskCvOutput>, AppError> {
    let Json(input) = payload?;
    let engine = Arc::clone(&state.engine);
    let answer = tokio::task::spawn_blocking(move || engine.answer(&input.question))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(AskCvOutput { answer }))
}

/// POST /email/send
pub async fn handle_email_send(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailInput>, JsonRejection>,
) -> Result<Json<MailOutcome>, AppError> {
    let Json(input) = payload?;
    let outcome = state
        .gateway
        .send_email(&input.recipient, &input.subject, &input.body)
        .await;
    Ok(Json(outcome))
}
