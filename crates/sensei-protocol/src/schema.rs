//! JSON Schema helpers for MCP tool input descriptions.

use serde_json::{Map, Value};

use sensei_types::ArgumentSpec;

/// Builds a JSON Schema `inputSchema` from declared arguments.
///
/// `required` lists names in declaration order and is omitted when empty.
pub fn build_input_schema(arguments: &[ArgumentSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for arg in arguments {
        let mut prop = Map::new();
        prop.insert("type".to_string(), Value::String(arg.arg_type.clone()));
        prop.insert(
            "description".to_string(),
            Value::String(arg.description.clone()),
        );
        if let Some(default) = &arg.default {
            prop.insert("default".to_string(), Value::String(default.clone()));
        }
        properties.insert(arg.name.clone(), Value::Object(prop));
        if arg.required {
            required.push(Value::String(arg.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}
