//! Tool, prompt and resource descriptors.
//!
//! Descriptors are built once when the catalog loads and are only read
//! afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Argument accepted by a tool or a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name.
    pub name: String,
    /// JSON Schema type (string, number, boolean, etc.).
    #[serde(rename = "type", default = "default_arg_type")]
    pub arg_type: String,
    /// Human-readable description.
    pub description: String,
    /// Whether this argument is required.
    #[serde(default)]
    pub required: bool,
    /// Value substituted when the caller omits the argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

fn default_arg_type() -> String {
    "string".to_string()
}

/// Returns the first required argument absent from `provided`.
///
/// Presence is all that is checked; a required argument set to `null`
/// still counts as present.
pub fn first_missing_argument<'a>(
    specs: &'a [ArgumentSpec],
    provided: &Map<String, Value>,
) -> Option<&'a str> {
    specs
        .iter()
        .filter(|spec| spec.required)
        .find(|spec| !provided.contains_key(&spec.name))
        .map(|spec| spec.name.as_str())
}

/// A tool that forwards a rendered instruction to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,
    /// MCP description.
    pub description: String,
    /// Declared arguments, in schema order.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Instruction template with `{argument}` placeholders.
    pub instruction: String,
}

/// A reusable prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDescriptor {
    /// Unique prompt name.
    pub name: String,
    /// MCP description.
    pub description: String,
    /// Declared arguments.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Template with `{argument}` placeholders.
    pub template: String,
}

/// A static documentation resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// URI-like lookup key (e.g. `patterns://design-patterns`).
    pub uri: String,
    /// Display name.
    pub name: String,
    /// MCP description.
    pub description: String,
    /// MIME type of `text`.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Resource body.
    pub text: String,
}

fn default_mime_type() -> String {
    "text/markdown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(name: &str, required: bool) -> ArgumentSpec {
        ArgumentSpec {
            name: name.into(),
            arg_type: "string".into(),
            description: format!("{name} arg"),
            required,
            default: None,
        }
    }

    #[test]
    fn finds_first_missing_required() {
        let specs = vec![spec("code", true), spec("error", true), spec("context", false)];
        let provided = json!({"code": "x"});
        let missing = first_missing_argument(&specs, provided.as_object().expect("obj"));
        assert_eq!(missing, Some("error"));
    }

    #[test]
    fn optional_arguments_are_never_missing() {
        let specs = vec![spec("language", false)];
        assert_eq!(first_missing_argument(&specs, &Map::new()), None);
    }

    #[test]
    fn null_counts_as_present() {
        let specs = vec![spec("code", true)];
        let provided = json!({"code": null});
        assert_eq!(
            first_missing_argument(&specs, provided.as_object().expect("obj")),
            None
        );
    }

    #[test]
    fn argument_type_defaults_to_string() {
        let arg: ArgumentSpec =
            serde_json::from_value(json!({"name": "code", "description": "d"})).expect("de");
        assert_eq!(arg.arg_type, "string");
        assert!(!arg.required);
    }

    #[test]
    fn resource_mime_type_defaults_to_markdown() {
        let res: ResourceDescriptor = serde_json::from_value(json!({
            "uri": "x://y", "name": "n", "description": "d", "text": "# t"
        }))
        .expect("de");
        assert_eq!(res.mime_type, "text/markdown");
    }
}
