//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`. Blank lines
//! are skipped. Nothing but protocol messages is ever written to the
//! output stream.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// Generic over reader/writer so tests can use in-memory buffers.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wraps `reader` in a buffer; `writer` is used as is.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next non-blank line as raw bytes, without its line ending.
    ///
    /// Returns `None` on EOF. The bytes are not decoded here; a line that
    /// is not UTF-8 must reach the server intact so it can be answered
    /// with a parse error.
    pub async fn read_message(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        loop {
            let mut line = Vec::new();
            let n = self
                .reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|e| TransportError::Read(e.to_string()))?;
            if n == 0 {
                return Ok(None);
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            while line.last().is_some_and(u8::is_ascii_whitespace) {
                line.pop();
            }
            trace!(len = line.len(), "read message");
            return Ok(Some(line));
        }
    }

    /// Writes one message followed by `\n`, then flushes.
    pub async fn write_message(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");
        let write = |e: std::io::Error| TransportError::Write(e.to_string());
        self.writer.write_all(message.as_bytes()).await.map_err(write)?;
        self.writer.write_all(b"\n").await.map_err(write)?;
        self.writer.flush().await.map_err(write)
    }
}
