//! # sensei-mcp
//!
//! MCP method dispatch handler (APPLICATION layer).
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing validated
//! JSON-RPC requests to the catalog and the completion service.

mod dispatch;
pub mod handler;

pub use dispatch::tools_call::NO_RESPONSE;
pub use handler::{HandlerConfig, JsonRpcOutput, McpHandler, McpMethod};
