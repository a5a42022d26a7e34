//! MCP request handler: routes JSON-RPC requests to method handlers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use sensei_catalog::Catalog;
use sensei_completion::CompletionService;
use sensei_protocol::{
    methods, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId, RpcError,
};

use crate::dispatch;

/// A JSON-RPC response: either success or error.
#[derive(Debug)]
pub enum JsonRpcOutput {
    /// Successful response.
    Success(JsonRpcResponse),
    /// Error response.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Builds an error output for `id` (or `null`).
    pub fn from_error(error: RpcError, id: Option<RequestId>) -> Self {
        Self::Error(error.into_response(id))
    }

    /// Serializes the output to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_string(r),
            Self::Error(r) => serde_json::to_string(r),
        }
    }

    /// True for the error variant.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Methods the dispatcher answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum McpMethod {
    /// `initialize`
    Initialize,
    /// `ping`
    Ping,
    /// `tools/list`
    ToolsList,
    /// `tools/call`
    ToolsCall,
    /// `prompts/list`
    PromptsList,
    /// `prompts/get`
    PromptsGet,
    /// `resources/list`
    ResourcesList,
    /// `resources/read`
    ResourcesRead,
}

impl McpMethod {
    /// Every routed method.
    pub const ALL: [McpMethod; 8] = [
        Self::Initialize,
        Self::Ping,
        Self::ToolsList,
        Self::ToolsCall,
        Self::PromptsList,
        Self::PromptsGet,
        Self::ResourcesList,
        Self::ResourcesRead,
    ];

    /// Exact-match lookup of a wire method name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => methods::INITIALIZE,
            Self::Ping => methods::PING,
            Self::ToolsList => methods::TOOLS_LIST,
            Self::ToolsCall => methods::TOOLS_CALL,
            Self::PromptsList => methods::PROMPTS_LIST,
            Self::PromptsGet => methods::PROMPTS_GET,
            Self::ResourcesList => methods::RESOURCES_LIST,
            Self::ResourcesRead => methods::RESOURCES_READ,
        }
    }
}

/// Settings the handler needs at request time.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Reported in `initialize` as `serverInfo.name`.
    pub server_name: String,
    /// Model passed to the completion service.
    pub model: String,
    /// Upper bound on one completion call.
    pub completion_timeout: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            server_name: "sensei".to_string(),
            model: "gpt-4o".to_string(),
            completion_timeout: Duration::from_secs(120),
        }
    }
}

/// Handles MCP JSON-RPC requests by dispatching to the catalog and the
/// completion service.
///
/// Holds no per-request state; the same handler serves every request
/// for the life of the process.
pub struct McpHandler {
    catalog: Arc<Catalog>,
    completion: Arc<dyn CompletionService>,
    config: HandlerConfig,
}

impl McpHandler {
    /// Creates a new handler with the given catalog and completion service.
    pub fn new(
        catalog: Arc<Catalog>,
        completion: Arc<dyn CompletionService>,
        config: HandlerConfig,
    ) -> Self {
        Self {
            catalog,
            completion,
            config,
        }
    }

    /// Dispatches a JSON-RPC request to the appropriate method handler.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        let Some(method) = McpMethod::parse(&request.method) else {
            debug!(method = %request.method, id = ?id, "method not found");
            return JsonRpcOutput::from_error(
                RpcError::MethodNotFound(request.method.clone()),
                Some(id),
            );
        };

        match self.route(method, &request.params).await {
            Ok(result) => JsonRpcOutput::Success(JsonRpcResponse::success(id, result)),
            Err(e) => {
                debug!(
                    method = method.as_str(),
                    id = ?id,
                    code = e.code(),
                    error = %e,
                    "request failed"
                );
                JsonRpcOutput::from_error(e, Some(id))
            }
        }
    }

    async fn route(&self, method: McpMethod, params: &Option<Value>) -> Result<Value, RpcError> {
        match method {
            McpMethod::Initialize => {
                dispatch::initialize::handle_initialize(&self.config.server_name)
            }
            McpMethod::Ping => Ok(Value::Object(Default::default())),
            McpMethod::ToolsList => dispatch::tools_list::handle_tools_list(&self.catalog),
            McpMethod::ToolsCall => {
                dispatch::tools_call::handle_tools_call(
                    params,
                    &self.catalog,
                    self.completion.as_ref(),
                    &self.config,
                )
                .await
            }
            McpMethod::PromptsList => dispatch::prompts::handle_prompts_list(&self.catalog),
            McpMethod::PromptsGet => dispatch::prompts::handle_prompts_get(params, &self.catalog),
            McpMethod::ResourcesList => {
                dispatch::resources::handle_resources_list(&self.catalog)
            }
            McpMethod::ResourcesRead => {
                dispatch::resources::handle_resources_read(params, &self.catalog)
            }
        }
    }

    /// Handles a JSON-RPC notification (no response expected).
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATIONS_INITIALIZED => debug!("client initialized"),
            methods::NOTIFICATIONS_CANCELLED => {
                debug!(params = ?notification.params, "client cancelled a request")
            }
            other => debug!(method = %other, "ignoring notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(McpMethod::parse("tools/call"), Some(McpMethod::ToolsCall));
        assert_eq!(McpMethod::parse("tools/call "), None);
        assert_eq!(McpMethod::parse("Tools/Call"), None);
        assert_eq!(McpMethod::parse("notifications/initialized"), None);
    }

    #[test]
    fn names_round_trip() {
        for method in McpMethod::ALL {
            assert_eq!(McpMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn error_output_serializes_null_id() {
        let out = JsonRpcOutput::from_error(RpcError::Parse("eof".into()), None);
        let json: Value = serde_json::from_str(&out.to_json().expect("json")).expect("parse");
        assert!(json["id"].is_null());
        assert_eq!(json["error"]["code"], -32700);
        assert!(out.is_error());
    }
}
