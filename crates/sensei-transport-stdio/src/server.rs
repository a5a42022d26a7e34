//! MCP server loop over stdio transport.
//!
//! Reads one line, answers it, then reads the next. Per line:
//! bytes that are not UTF-8 or not JSON get a parse error with a `null` id, a bad envelope
//! gets an invalid-request error, a notification (no `id`, or a `null`
//! one) gets no response at all, and a request is dispatched.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use sensei_mcp::{JsonRpcOutput, McpHandler};
use sensei_protocol::{validate_envelope, Envelope, RpcError};

use crate::error::TransportError;
use crate::transport::StdioTransport;

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Pairs a transport with the handler that answers its requests.
    pub fn new(transport: StdioTransport<R, W>, handler: McpHandler) -> Self {
        Self { transport, handler }
    }

    /// Runs until the input is closed.
    ///
    /// Returns an error only when the transport itself fails; bad input
    /// never stops the loop.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server starting on stdio");

        while let Some(bytes) = self.transport.read_message().await? {
            if let Some(output) = self.handle_bytes(&bytes).await {
                self.write_output(&output).await?;
            }
        }

        info!("input closed, shutting down");
        Ok(())
    }

    /// Decodes one raw input line and produces its response, if any.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<JsonRpcOutput> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.handle_line(line).await,
            Err(e) => {
                warn!(error = %e, "input line is not valid UTF-8");
                Some(JsonRpcOutput::from_error(
                    RpcError::Parse(format!("invalid UTF-8: {e}")),
                    None,
                ))
            }
        }
    }

    /// Produces the response for one input line, if it needs one.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcOutput> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(JsonRpcOutput::from_error(RpcError::from(e), None));
            }
        };

        match validate_envelope(value) {
            Ok(Envelope::Request(request)) => {
                debug!(method = %request.method, id = ?request.id, "received request");
                Some(self.handler.dispatch(&request).await)
            }
            Ok(Envelope::Notification(notification)) => {
                debug!(method = %notification.method, "received notification");
                self.handler.handle_notification(&notification);
                None
            }
            Err(rejected) => {
                warn!(error = %rejected.error, id = ?rejected.id, "invalid JSON-RPC envelope");
                let id = rejected.id.clone();
                Some(JsonRpcOutput::from_error(RpcError::from(rejected), id))
            }
        }
    }

    /// Serializes and writes a JSON-RPC output to the transport.
    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        match output.to_json() {
            Ok(json) => self.transport.write_message(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Write(e.to_string()))
            }
        }
    }
}
