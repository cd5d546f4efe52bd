use serde_json::{json, Value};
use tracing::debug;

use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, RpcError, RpcId};
use crate::mcp::registry::ToolName;
use crate::mcp::tools::call_tool;
use crate::state::AppState;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "cv-server";

/// Handles one decoded JSON payload. Returns `None` for notifications.
///
/// There is no initialization gate: every method is served whether or not
/// `initialize` was called first, since the HTTP transport keeps no session.
pub async fn handle_message(state: &AppState, payload: Value) -> Option<JsonRpcResponse> {
    let req = match JsonRpcRequest::from_value(payload) {
        Ok(req) => req,
        Err(id) => return Some(JsonRpcResponse::error(id, &RpcError::InvalidRequest)),
    };

    if req.is_notification() {
        debug!(method = %req.method, "Notification received");
        return None;
    }

    debug!(method = %req.method, id = ?req.id, "Dispatching request");
    let response = match dispatch(state, &req).await {
        Ok(result) => JsonRpcResponse::success(req.id, result),
        Err(e) => {
            debug!(code = e.code(), "Request failed: {e}");
            JsonRpcResponse::error(req.id, &e)
        }
    };
    Some(response)
}

async fn dispatch(state: &AppState, req: &JsonRpcRequest) -> Result<Value, RpcError> {
    match req.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": true },
                "resources": { "listChanged": true }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })),

        "ping" => Ok(json!({})),

        "tools/list" => Ok(json!({ "tools": state.registry.list_tools() })),

        "tools/call" => {
            let mut params = req.params_object()?;
            let name = match params.get("name") {
                Some(Value::String(name)) => name.clone(),
                _ => {
                    return Err(RpcError::InvalidParams(
                        "tools/call requires a string 'name'".to_string(),
                    ))
                }
            };
            let tool = ToolName::parse(&name).ok_or(RpcError::UnknownTool(name))?;
            let args = match params.remove("arguments") {
                None | Some(Value::Null) => json!({}),
                Some(args) => args,
            };

            let result = call_tool(state, tool, args).await?;
            Ok(serde_json::to_value(result)?)
        }

        "resources/list" => Ok(json!({ "resources": state.registry.list_resources() })),

        "resources/read" => {
            let params = req.params_object()?;
            let uri = params.get("uri").and_then(Value::as_str).ok_or_else(|| {
                RpcError::InvalidParams("resources/read requires a string 'uri'".to_string())
            })?;
            let contents = state.registry.read_resource(uri)?;
            Ok(json!({ "contents": [contents] }))
        }

        other => Err(RpcError::UnknownMethod(other.to_string())),
    }
}

/// Response for a body that could not be decoded as JSON at all.
pub fn parse_error_response() -> JsonRpcResponse {
    JsonRpcResponse::error(RpcId::Null, &RpcError::Parse)
}
