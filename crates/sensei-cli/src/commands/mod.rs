//! CLI command definitions.

pub mod chat;
pub mod list;
pub mod serve;
