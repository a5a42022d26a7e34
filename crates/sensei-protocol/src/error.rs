//! Protocol-level error taxonomy.
//!
//! Every failure that reaches the client is one of these variants; the
//! handler boundary turns it into a [`JsonRpcErrorResponse`].

use thiserror::Error;

use crate::envelope::RejectedEnvelope;
use crate::jsonrpc::{error_codes, JsonRpcErrorResponse, RequestId};

/// A JSON-RPC error with its wire code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// The input line was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
    /// Valid JSON, invalid envelope shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// No handler for the method.
    #[error("unknown method: {0}")]
    MethodNotFound(String),
    /// Known method, bad or missing arguments.
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// A collaborator failed.
    #[error("internal error: {0}")]
    Internal(String),
    /// The completion service did not answer in time.
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl RpcError {
    /// Returns the JSON-RPC error code for this variant.
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => error_codes::PARSE_ERROR,
            Self::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            Self::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => error_codes::INVALID_PARAMS,
            Self::Internal(_) => error_codes::INTERNAL_ERROR,
            Self::Timeout(_) => error_codes::REQUEST_TIMEOUT,
        }
    }

    /// Wraps the error in a response envelope.
    pub fn into_response(self, id: Option<RequestId>) -> JsonRpcErrorResponse {
        JsonRpcErrorResponse::with_optional_id(id, self.code(), self.to_string())
    }
}

impl From<RejectedEnvelope> for RpcError {
    fn from(rejected: RejectedEnvelope) -> Self {
        Self::InvalidRequest(rejected.error.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeError;

    #[test]
    fn codes_match_jsonrpc_numbering() {
        assert_eq!(RpcError::Parse("x".into()).code(), -32700);
        assert_eq!(RpcError::InvalidRequest("x".into()).code(), -32600);
        assert_eq!(RpcError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(RpcError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(RpcError::Internal("x".into()).code(), -32603);
        assert_eq!(RpcError::Timeout(5).code(), -32001);
    }

    #[test]
    fn response_echoes_id_and_message() {
        let resp =
            RpcError::MethodNotFound("foo".into()).into_response(Some(RequestId::from(3i64)));
        assert_eq!(resp.id, Some(RequestId::from(3i64)));
        assert_eq!(resp.error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(resp.error.message, "unknown method: foo");
    }

    #[test]
    fn rejected_envelope_becomes_invalid_request() {
        let rejected = RejectedEnvelope {
            id: None,
            error: EnvelopeError::MissingMethod,
        };
        let err: RpcError = rejected.into();
        assert_eq!(err.code(), error_codes::INVALID_REQUEST);
        assert!(err.to_string().contains("method"));
    }
}
