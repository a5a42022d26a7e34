//! Handles the `tools/list` MCP method.

use serde_json::Value;

use sensei_catalog::Catalog;
use sensei_protocol::mcp::{McpToolDefinition, ToolsListResult};
use sensei_protocol::schema::build_input_schema;
use sensei_protocol::RpcError;

use super::to_result;

/// Lists every tool in catalog order.
pub(crate) fn handle_tools_list(catalog: &Catalog) -> Result<Value, RpcError> {
    let tools = catalog
        .tools()
        .iter()
        .map(|t| McpToolDefinition {
            name: t.name.clone(),
            description: Some(t.description.clone()),
            input_schema: build_input_schema(&t.arguments),
        })
        .collect();
    to_result(ToolsListResult { tools })
}
