//! JSON-RPC request and response envelopes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved code for unknown method names
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Reserved code for bodies that are not JSON
pub const PARSE_ERROR: i64 = -32700;

/// Incoming call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
    /// Echoed back verbatim
    #[serde(default)]
    pub id: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            method: Some(method.into()),
            params,
            id,
        }
    }

    /// Params as an object; anything else counts as empty
    pub fn params_object(&self) -> Map<String, Value> {
        self.params.as_object().cloned().unwrap_or_default()
    }
}

/// Error object carried in a failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// 400: missing or malformed parameter
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 404: unknown resource or tool
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// 500: anything else that went wrong on our side
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// 502: the remote service failed
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(502, message)
    }

    pub fn method_not_found() -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found")
    }

    pub fn parse_error() -> Self {
        Self::new(PARSE_ERROR, "Parse error")
    }
}

/// Outgoing envelope: exactly one of `result` and `error` is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl RpcResponse {
    pub fn ok(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn err(error: RpcError, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn from_result(result: Result<Value, RpcError>, id: Value) -> Self {
        match result {
            Ok(value) => Self::ok(value, id),
            Err(error) => Self::err(error, id),
        }
    }
}
