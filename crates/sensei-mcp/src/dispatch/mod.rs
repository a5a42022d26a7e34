//! MCP method dispatch functions.
//!
//! Each sub-module handles one family of MCP methods as free functions
//! returning `Result<Value, RpcError>`; `McpHandler` turns the result
//! into a response envelope.

pub(crate) mod initialize;
pub(crate) mod prompts;
pub(crate) mod resources;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use sensei_protocol::RpcError;

/// Decodes required method params.
pub(crate) fn parse_params<T: DeserializeOwned>(
    params: &Option<Value>,
    method: &str,
) -> Result<T, RpcError> {
    let Some(value) = params else {
        return Err(RpcError::InvalidParams(format!("{method} requires params")));
    };
    serde_json::from_value(value.clone())
        .map_err(|e| RpcError::InvalidParams(format!("invalid {method} params: {e}")))
}

/// Serializes a result payload.
pub(crate) fn to_result<T: Serialize>(result: T) -> Result<Value, RpcError> {
    serde_json::to_value(result).map_err(|e| RpcError::Internal(e.to_string()))
}
