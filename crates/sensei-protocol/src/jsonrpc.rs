//! JSON-RPC 2.0 types for MCP transport.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The only protocol version accepted in the `jsonrpc` member.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID, echoed verbatim in the response.
    pub id: RequestId,
    /// Method name.
    pub method: String,
    /// Optional parameters (always an object once validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (matches the request).
    pub id: RequestId,
    /// Result value.
    pub result: Value,
}

/// JSON-RPC 2.0 error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID, or `null` when it could not be determined.
    pub id: Option<RequestId>,
    /// Error details.
    pub error: JsonRpcError,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ID can be a number or string.
///
/// Integer ids are kept as the parsed JSON number, so ids outside the
/// `i64` range still round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer ID.
    Number(Number),
    /// String ID.
    String(String),
}

impl RequestId {
    /// Reads an id from a JSON value. Only integers and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::String(id.to_string())
    }
}

/// JSON-RPC 2.0 notification (no id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Standard JSON-RPC error codes, plus the server-defined timeout code.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// The completion service did not answer within the configured timeout.
    /// Lives in the implementation-defined server range (-32000..=-32099).
    pub const REQUEST_TIMEOUT: i32 = -32001;
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC 2.0 request.
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Creates a success response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Creates an error response for a known request id.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self::with_optional_id(Some(id), code, message)
    }

    /// Creates an error response echoing `id` when present.
    pub fn with_optional_id(id: Option<RequestId>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_id_from_integer_and_string() {
        assert_eq!(RequestId::from_value(&json!(7)), Some(RequestId::from(7i64)));
        assert_eq!(RequestId::from_value(&json!(-7)), Some(RequestId::from(-7i64)));
        assert_eq!(
            RequestId::from_value(&json!("abc")),
            Some(RequestId::String("abc".into()))
        );
    }

    #[test]
    fn request_id_rejects_other_types() {
        assert_eq!(RequestId::from_value(&json!(1.5)), None);
        assert_eq!(RequestId::from_value(&json!(true)), None);
        assert_eq!(RequestId::from_value(&json!(null)), None);
        assert_eq!(RequestId::from_value(&json!([1])), None);
    }

    #[test]
    fn request_id_beyond_i64_is_kept() {
        let big = u64::MAX;
        let id = RequestId::from_value(&json!(big)).expect("u64 id");
        assert_eq!(id, RequestId::from(big));
        assert_eq!(serde_json::to_string(&id).expect("ser"), big.to_string());
    }

    #[test]
    fn error_without_id_serializes_null() {
        let err =
            JsonRpcErrorResponse::with_optional_id(None, error_codes::PARSE_ERROR, "parse error");
        let s = serde_json::to_string(&err).expect("ser");
        assert!(s.contains("\"id\":null"));
        assert!(!s.contains("\"data\""));
    }

    #[test]
    fn error_echoes_known_id() {
        let err = JsonRpcErrorResponse::error(RequestId::from(3i64), -32602, "bad");
        let s = serde_json::to_string(&err).expect("ser");
        assert!(s.contains("\"id\":3"));
    }
}
