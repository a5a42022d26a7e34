//! Transport errors.
//!
//! Only I/O failures end the server loop; malformed messages are answered
//! on the wire instead.

use thiserror::Error;

/// Errors from the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from the input stream.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to the output stream.
    #[error("write error: {0}")]
    Write(String),
}
