//! # sensei-types
//!
//! Domain types for the sensei dispatcher.
//! This crate contains pure data types with no I/O
//! (serde only, for catalog loading and wire output).

pub mod descriptor;
pub mod error;

// Re-exports for convenience.
pub use descriptor::{
    first_missing_argument, ArgumentSpec, PromptDescriptor, ResourceDescriptor, ToolDescriptor,
};
pub use error::DiagnosticError;
