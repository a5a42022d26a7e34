//! Handles the `resources/list` and `resources/read` MCP methods.

use serde_json::Value;

use sensei_catalog::Catalog;
use sensei_protocol::mcp::{
    McpResourceDefinition, ResourcesListResult, ResourcesReadParams, ResourcesReadResult,
    TextResourceContents,
};
use sensei_protocol::{methods, RpcError};

use super::{parse_params, to_result};

pub(crate) fn handle_resources_list(catalog: &Catalog) -> Result<Value, RpcError> {
    let resources = catalog
        .resources()
        .iter()
        .map(|r| McpResourceDefinition {
            uri: r.uri.clone(),
            name: r.name.clone(),
            description: Some(r.description.clone()),
            mime_type: Some(r.mime_type.clone()),
        })
        .collect();
    to_result(ResourcesListResult { resources })
}

pub(crate) fn handle_resources_read(
    params: &Option<Value>,
    catalog: &Catalog,
) -> Result<Value, RpcError> {
    let read: ResourcesReadParams = parse_params(params, methods::RESOURCES_READ)?;
    let resource = catalog
        .find_resource(&read.uri)
        .ok_or_else(|| RpcError::InvalidParams(format!("unknown resource: {}", read.uri)))?;

    to_result(ResourcesReadResult {
        contents: vec![TextResourceContents {
            uri: resource.uri.clone(),
            mime_type: Some(resource.mime_type.clone()),
            text: resource.text.clone(),
        }],
    })
}
