//! Catalog loading errors.

use sensei_types::DiagnosticError;
use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The TOML content is invalid or missing required fields.
    #[error("invalid catalog: {0}")]
    Parse(String),
    /// Two entries of the same kind share a key.
    #[error("duplicate {kind} '{key}'")]
    Duplicate { kind: &'static str, key: String },
    /// An entry is structurally unusable.
    #[error("invalid {kind} '{key}': {reason}")]
    InvalidEntry {
        kind: &'static str,
        key: String,
        reason: String,
    },
}

impl DiagnosticError for CatalogError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Io { path, .. } => {
                Some(format!("The file '{path}' does not exist or is not readable."))
            }
            Self::Parse(_) => Some("The catalog is not valid TOML or lacks a required key.".into()),
            Self::Duplicate { kind, .. } => {
                Some(format!("Every {kind} must be declared exactly once."))
            }
            Self::InvalidEntry { .. } => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Io { .. } => Some("Pass an existing file: sensei serve --catalog <path>".into()),
            Self::Parse(_) => Some(
                "Each [[tools]] needs name, description and instruction; \
                 each [[prompts]] needs name, description and template."
                    .into(),
            ),
            Self::Duplicate { .. } => Some("Rename or remove the second entry.".into()),
            Self::InvalidEntry { .. } => None,
        }
    }
}
