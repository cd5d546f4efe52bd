//! Tool inputs and the code that runs each tool.
//!
//! Arguments are checked against the registry schema first; decoding into
//! these types is the second, typed gate. Failures while running a tool are
//! reported as `isError` results, never as protocol errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::mcp::protocol::{RpcError, ToolResult};
use crate::mcp::registry::ToolName;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskCvInput {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskCvOutput {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailInput {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Validates, decodes and runs one tool invocation.
pub async fn call_tool(
    state: &AppState,
    tool: ToolName,
    args: Value,
) -> Result<ToolResult, RpcError> {
    state
        .registry
        .validate_arguments(tool, &args)
        .map_err(|errors| {
            RpcError::InvalidParams(format!("{}: {}", tool.as_str(), errors.join("; ")))
        })?;

    match tool {
        ToolName::AskCv => Ok(ask_cv(state, decode(tool, args)?).await),
        ToolName::SendEmail => send_email(state, decode(tool, args)?).await,
    }
}

fn decode<T: serde::de::DeserializeOwned>(tool: ToolName, args: Value) -> Result<T, RpcError> {
    serde_json::from_value(args)
        .map_err(|e| RpcError::InvalidParams(format!("{}: {e}", tool.as_str())))
}

async fn ask_cv(state: &AppState, input: AskCvInput) -> ToolResult {
    // Fuzzy scoring is CPU-bound; keep it off the async workers.
    let engine = Arc::clone(&state.engine);
    match tokio::task::spawn_blocking(move || engine.answer(&input.question)).await {
        Ok(answer) => {
            let structured = json!({ "answer": answer });
            ToolResult::text(answer).with_structured(structured)
        }
        Err(e) => {
            error!("ask_cv worker failed: {e}");
            ToolResult::error(format!("ask_cv failed: {e}"))
        }
    }
}

async fn send_email(state: &AppState, input: SendEmailInput) -> Result<ToolResult, RpcError> {
    let outcome = state
        .gateway
        .send_email(&input.recipient, &input.subject, &input.body)
        .await;

    let structured = serde_json::to_value(&outcome)?;
    let text = serde_json::to_string(&outcome)?;
    let result = if outcome.ok {
        ToolResult::text(text)
    } else {
        ToolResult::error(text)
    };
    Ok(result.with_structured(structured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, RecordingMailer};

    #[tokio::test]
    async fn test_ask_cv_result_shape() {
        let state = test_state(Arc::new(RecordingMailer::default()));
        let result = call_tool(&state, ToolName::AskCv, json!({"question": "name"}))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content[0].text, "Alex Morgan");
        assert_eq!(result.structured_content, Some(json!({"answer": "Alex Morgan"})));
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_params() {
        let state = test_state(Arc::new(RecordingMailer::default()));
        let err = call_tool(
            &state,
            ToolName::SendEmail,
            json!({"recipient": "a@example.com", "subject": "Hi"}),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), -32602);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_tool_error() {
        let state = test_state(Arc::new(RecordingMailer::failing("relay down")));
        let result = call_tool(
            &state,
            ToolName::SendEmail,
            json!({"recipient": "a@example.com", "subject": "Hi", "body": "Hello"}),
        )
        .await
        .unwrap();

        assert!(result.is_error);
        assert_eq!(result.content[0].text, r#"{"ok":false,"error":"relay down"}"#);
    }

    #[tokio::test]
    async fn test_empty_body_is_tool_error_not_protocol_error() {
        let mailer = Arc::new(RecordingMailer::default());
        let state = test_state(mailer.clone());
        let result = call_tool(
            &state,
            ToolName::SendEmail,
            json!({"recipient": "a@example.com", "subject": "Hi", "body": ""}),
        )
        .await
        .unwrap();

        assert!(result.is_error);
        assert!(mailer.sent().is_empty());
    }
}
