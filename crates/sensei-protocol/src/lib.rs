//! # sensei-protocol
//!
//! MCP protocol and JSON-RPC 2.0 type definitions.
//! This crate defines the wire format spoken between an MCP client and
//! the sensei dispatcher, and the pure envelope validator.

pub mod envelope;
pub mod error;
pub mod jsonrpc;
pub mod mcp;
pub mod schema;

pub use envelope::{validate_envelope, Envelope, EnvelopeError, RejectedEnvelope};
pub use error::RpcError;
pub use jsonrpc::*;
pub use mcp::methods;
