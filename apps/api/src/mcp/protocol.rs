//! JSON-RPC 2.0 envelope types and protocol-level errors.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";

/// Request identifier, echoed back exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(Number),
    Str(String),
    Null,
}

impl RpcId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(RpcId::Number(n.clone())),
            Value::String(s) => Some(RpcId::Str(s.clone())),
            Value::Null => Some(RpcId::Null),
            _ => None,
        }
    }

    /// Best-effort id recovery from an arbitrary payload; `Null` when unusable.
    pub fn recover(envelope: &Value) -> Self {
        envelope
            .get("id")
            .and_then(RpcId::from_value)
            .unwrap_or(RpcId::Null)
    }
}

/// A request envelope that passed shape validation.
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    pub id: RpcId,
    /// `false` when the envelope carried no `id` key at all.
    pub has_id: bool,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validates the envelope shape. On failure returns the id to echo with
    /// the `Invalid Request` error.
    pub fn from_value(value: Value) -> Result<Self, RpcId> {
        let Value::Object(mut obj) = value else {
            return Err(RpcId::Null);
        };

        let has_id = obj.contains_key("id");
        let id = match obj.get("id") {
            None => RpcId::Null,
            Some(raw) => RpcId::from_value(raw).ok_or(RpcId::Null)?,
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(id);
        }

        let method = match obj.remove("method") {
            Some(Value::String(m)) => m,
            _ => return Err(id),
        };

        let params = match obj.remove("params") {
            None | Some(Value::Null) => None,
            Some(p @ (Value::Object(_) | Value::Array(_))) => Some(p),
            Some(_) => return Err(id),
        };

        Ok(Self {
            id,
            has_id,
            method,
            params,
        })
    }

    pub fn is_notification(&self) -> bool {
        !self.has_id && self.method.starts_with("notifications/")
    }

    /// Params as a JSON object, or an empty object when absent.
    pub fn params_object(&self) -> Result<Map<String, Value>, RpcError> {
        match &self.params {
            None => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(RpcError::InvalidParams(
                "params must be an object".to_string(),
            )),
        }
    }
}

/// Protocol-level failures. Each maps onto a JSON-RPC error code.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Parse error")]
    Parse,

    #[error("Invalid Request")]
    InvalidRequest,

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("{0}")]
    Internal(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::Parse => -32700,
            RpcError::InvalidRequest => -32600,
            RpcError::UnknownMethod(_) | RpcError::UnknownTool(_) => -32601,
            RpcError::InvalidParams(_) | RpcError::UnknownResource(_) => -32602,
            RpcError::Internal(_) => -32603,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::Internal(e.to_string())
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JsonRpcErrorObject {
    pub code: i32,
    pub message: String,
}

impl From<&RpcError> for JsonRpcErrorObject {
    fn from(e: &RpcError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: RpcId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn success(id: RpcId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: RpcId, error: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool result payload (carried inside a successful response)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text",
                text: text.into(),
            }],
            structured_content: None,
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }

    pub fn with_structured(mut self, value: Value) -> Self {
        self.structured_content = Some(value);
        self
    }
}
