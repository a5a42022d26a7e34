//! Catalog loader: reads and parses catalog TOML.
//!
//! The built-in catalog is compiled into the binary; an alternative file
//! can be supplied at startup. Either way parsing happens once and the
//! result is immutable.

use std::collections::HashSet;
use std::path::Path;

use sensei_types::{ArgumentSpec, PromptDescriptor, ResourceDescriptor, ToolDescriptor};

use crate::catalog::Catalog;
use crate::error::CatalogError;

/// TOML source of the built-in catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.toml");

/// Parses a catalog TOML string.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed TOML and
/// `CatalogError::Duplicate` / `CatalogError::InvalidEntry` when the
/// entries themselves are inconsistent.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

    check_unique("tool", raw.tools.iter().map(|t| t.name.as_str()))?;
    check_unique("prompt", raw.prompts.iter().map(|p| p.name.as_str()))?;
    check_unique("resource", raw.resources.iter().map(|r| r.uri.as_str()))?;

    for tool in &raw.tools {
        check_entry("tool", &tool.name, &tool.arguments)?;
    }
    for prompt in &raw.prompts {
        check_entry("prompt", &prompt.name, &prompt.arguments)?;
    }
    for resource in &raw.resources {
        if resource.uri.trim().is_empty() {
            return Err(CatalogError::InvalidEntry {
                kind: "resource",
                key: resource.name.clone(),
                reason: "uri cannot be empty".into(),
            });
        }
    }

    tracing::debug!(
        tools = raw.tools.len(),
        prompts = raw.prompts.len(),
        resources = raw.resources.len(),
        "catalog parsed"
    );
    Ok(Catalog::new(raw.tools, raw.prompts, raw.resources))
}

/// Reads a catalog file from disk and parses it.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_catalog`].
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

fn check_unique<'a>(
    kind: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CatalogError::Duplicate {
                kind,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn check_entry(kind: &'static str, name: &str, args: &[ArgumentSpec]) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidEntry {
        kind,
        key: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty".into()));
    }
    let mut seen = HashSet::new();
    for arg in args {
        if arg.name.trim().is_empty() {
            return Err(invalid("argument name cannot be empty".into()));
        }
        if !seen.insert(arg.name.as_str()) {
            return Err(invalid(format!("argument '{}' declared twice", arg.name)));
        }
        if arg.required && arg.default.is_some() {
            return Err(invalid(format!(
                "required argument '{}' cannot have a default",
                arg.name
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Private TOML deserialization types
// ---------------------------------------------------------------------------

/// Raw TOML structure mirroring the catalog file format.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
    #[serde(default)]
    prompts: Vec<PromptDescriptor>,
    #[serde(default)]
    resources: Vec<ResourceDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = parse_catalog(BUILTIN_CATALOG).expect("builtin");
        assert_eq!(catalog.tools().len(), 5);
        assert_eq!(catalog.prompts().len(), 4);
        assert_eq!(catalog.resources().len(), 4);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = parse_catalog("").expect("empty");
        assert!(catalog.tools().is_empty());
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        assert!(matches!(
            parse_catalog("widgets = []"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn required_with_default_rejected() {
        let src = r#"
[[tools]]
name = "t"
description = "d"
instruction = "{a}"

[[tools.arguments]]
name = "a"
description = "a"
required = true
default = "x"
"#;
        assert!(matches!(
            parse_catalog(src),
            Err(CatalogError::InvalidEntry { kind: "tool", .. })
        ));
    }
}
