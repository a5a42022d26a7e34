//! Handles the `initialize` MCP method.

use serde_json::Value;

use sensei_protocol::mcp::{InitializeResult, ServerCapabilities, ServerInfo, PROTOCOL_VERSION};
use sensei_protocol::RpcError;

use super::to_result;

/// Returns the static server capabilities. Client params are not inspected.
pub(crate) fn handle_initialize(server_name: &str) -> Result<Value, RpcError> {
    to_result(InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities::static_catalog(),
        server_info: ServerInfo {
            name: server_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}
