//! Handles the `tools/call` MCP method.

use serde_json::Value;
use tracing::{debug, warn};

use sensei_catalog::{render_instruction, Catalog};
use sensei_completion::{ChatMessage, CompletionService};
use sensei_protocol::mcp::{Content, ToolsCallParams, ToolsCallResult};
use sensei_protocol::{methods, RpcError};

use super::{parse_params, to_result};
use crate::handler::HandlerConfig;

/// Text returned when the completion service answers with nothing.
pub const NO_RESPONSE: &str = "No response generated";

/// Validates the call, renders the tool's instruction and forwards it to
/// the completion service.
///
/// Argument validation happens before any network call; a rejected
/// request never reaches the completion service.
pub(crate) async fn handle_tools_call(
    params: &Option<Value>,
    catalog: &Catalog,
    completion: &dyn CompletionService,
    config: &HandlerConfig,
) -> Result<Value, RpcError> {
    // 1. Parse params
    let call: ToolsCallParams = parse_params(params, methods::TOOLS_CALL)?;

    // 2. Resolve tool
    let tool = catalog
        .find_tool(&call.name)
        .ok_or_else(|| RpcError::InvalidParams(format!("unknown tool: {}", call.name)))?;

    // 3. Check arguments and render
    let arguments = call.arguments.unwrap_or_default();
    let instruction = render_instruction(tool, &arguments)
        .map_err(|e| RpcError::InvalidParams(e.to_string()))?;

    // 4. Complete, bounded
    debug!(tool = %tool.name, model = %config.model, "forwarding to completion service");
    let messages = [ChatMessage::user(instruction)];
    let text = match tokio::time::timeout(
        config.completion_timeout,
        completion.complete(&messages, &config.model),
    )
    .await
    {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(tool = %tool.name, error = %e, "completion failed");
            return Err(RpcError::Internal(e.to_string()));
        }
        Err(_) => {
            warn!(tool = %tool.name, timeout = ?config.completion_timeout, "completion timed out");
            return Err(RpcError::Timeout(config.completion_timeout.as_secs()));
        }
    };

    let text = if text.is_empty() {
        NO_RESPONSE.to_string()
    } else {
        text
    };

    to_result(ToolsCallResult {
        content: vec![Content::text(text)],
        is_error: false,
    })
}
