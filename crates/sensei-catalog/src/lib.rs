//! # sensei-catalog
//!
//! The static registries behind `tools/*`, `prompts/*` and `resources/*`.
//!
//! A catalog is parsed once at startup (from the embedded TOML or a file
//! given on the command line) and only read afterwards.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod template;

pub use catalog::{render_instruction, render_prompt, Catalog};
pub use error::CatalogError;
pub use loader::{load_catalog_file, parse_catalog, BUILTIN_CATALOG};
pub use template::{render, RenderError};
