//! MCP initialize method types.
//!
//! The initialize handshake is the first message a well-behaved client
//! sends. The server answers with a fixed capability set and does not
//! inspect the client's params.

use serde::{Deserialize, Serialize};

/// MCP protocol version supported by this implementation.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Capability flag for a list that never changes at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCapability {
    /// Whether the server emits `list_changed` notifications.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Resource capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCapability {
    /// Whether the server emits `list_changed` notifications.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
    /// Whether clients may subscribe to resource updates.
    pub subscribe: bool,
}

/// Server capabilities returned during initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Present if the server exposes tools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ListCapability>,
    /// Present if the server exposes prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<ListCapability>,
    /// Present if the server exposes resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceCapability>,
}

impl ServerCapabilities {
    /// Tools, prompts and resources, all static.
    pub fn static_catalog() -> Self {
        Self {
            tools: Some(ListCapability::default()),
            prompts: Some(ListCapability::default()),
            resources: Some(ResourceCapability::default()),
        }
    }
}

/// Server info returned during initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// Response for `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version agreed by server.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
    /// Server info.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}
