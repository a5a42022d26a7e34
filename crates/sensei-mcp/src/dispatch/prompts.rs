//! Handles the `prompts/list` and `prompts/get` MCP methods.

use serde_json::Value;

use sensei_catalog::{render_prompt, Catalog};
use sensei_protocol::mcp::{
    Content, McpPromptArgument, McpPromptDefinition, PromptMessage, PromptsGetParams,
    PromptsGetResult, PromptsListResult, Role,
};
use sensei_protocol::{methods, RpcError};

use super::{parse_params, to_result};

pub(crate) fn handle_prompts_list(catalog: &Catalog) -> Result<Value, RpcError> {
    let prompts = catalog
        .prompts()
        .iter()
        .map(|p| McpPromptDefinition {
            name: p.name.clone(),
            description: Some(p.description.clone()),
            arguments: p
                .arguments
                .iter()
                .map(|a| McpPromptArgument {
                    name: a.name.clone(),
                    description: Some(a.description.clone()),
                    required: a.required,
                })
                .collect(),
        })
        .collect();
    to_result(PromptsListResult { prompts })
}

/// Renders the named prompt as a single user message.
pub(crate) fn handle_prompts_get(
    params: &Option<Value>,
    catalog: &Catalog,
) -> Result<Value, RpcError> {
    let get: PromptsGetParams = parse_params(params, methods::PROMPTS_GET)?;
    let prompt = catalog
        .find_prompt(&get.name)
        .ok_or_else(|| RpcError::InvalidParams(format!("unknown prompt: {}", get.name)))?;

    let arguments = get.arguments.unwrap_or_default();
    let text =
        render_prompt(prompt, &arguments).map_err(|e| RpcError::InvalidParams(e.to_string()))?;

    to_result(PromptsGetResult {
        description: Some(prompt.description.clone()),
        messages: vec![PromptMessage {
            role: Role::User,
            content: Content::text(text),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("catalog")
    }

    #[test]
    fn list_exposes_argument_requirements() {
        let v = handle_prompts_list(&catalog()).expect("list");
        let first = &v["prompts"][0];
        assert_eq!(first["name"], "analyze_code");
        assert_eq!(first["arguments"][0]["name"], "code");
        assert_eq!(first["arguments"][0]["required"], true);
    }

    #[test]
    fn get_renders_user_message() {
        let params = Some(json!({"name": "explain_concept", "arguments": {"concept": "closures"}}));
        let v = handle_prompts_get(&params, &catalog()).expect("get");
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["messages"][0]["content"]["type"], "text");
        let text = v["messages"][0]["content"]["text"].as_str().expect("text");
        assert!(text.contains("closures"));
        assert!(text.contains("intermediate"));
    }

    #[test]
    fn unknown_prompt_is_invalid_params() {
        let params = Some(json!({"name": "nope"}));
        let err = handle_prompts_get(&params, &catalog()).expect_err("unknown");
        assert!(matches!(err, RpcError::InvalidParams(ref m) if m.contains("nope")));
    }

    #[test]
    fn missing_required_argument_is_named() {
        let params = Some(json!({"name": "code_review", "arguments": {}}));
        let err = handle_prompts_get(&params, &catalog()).expect_err("missing");
        assert!(matches!(err, RpcError::InvalidParams(ref m) if m.contains("code")));
    }

    #[test]
    fn absent_params_rejected() {
        let err = handle_prompts_get(&None, &catalog()).expect_err("no params");
        assert!(matches!(err, RpcError::InvalidParams(_)));
    }
}
