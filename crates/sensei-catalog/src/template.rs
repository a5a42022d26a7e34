//! `{placeholder}` template rendering.
//!
//! A placeholder is replaced only when its name is a declared argument;
//! any other brace sequence is copied through unchanged, so code samples
//! inside templates survive rendering.

use serde_json::{Map, Value};
use thiserror::Error;

use sensei_types::{first_missing_argument, ArgumentSpec};

/// Rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A required argument was not supplied.
    #[error("missing required argument: {0}")]
    MissingArgument(String),
}

/// Renders `template`, substituting declared arguments.
///
/// Lookup order for each placeholder: caller value, declared default,
/// empty string. Caller strings are used verbatim; other JSON values are
/// written in their JSON text form. Output is a pure function of the
/// inputs.
pub fn render(
    template: &str,
    specs: &[ArgumentSpec],
    provided: &Map<String, Value>,
) -> Result<String, RenderError> {
    if let Some(missing) = first_missing_argument(specs, provided) {
        return Err(RenderError::MissingArgument(missing.to_string()));
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let name = &after[..close];
        match specs.iter().find(|s| s.name == name) {
            Some(spec) => {
                out.push_str(&resolve(spec, provided));
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn resolve(spec: &ArgumentSpec, provided: &Map<String, Value>) -> String {
    match provided.get(&spec.name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => spec.default.clone().unwrap_or_default(),
        Some(other) => other.to_string(),
    }
}
