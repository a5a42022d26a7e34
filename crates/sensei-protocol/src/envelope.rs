//! Envelope validation: raw JSON value to typed request or notification.
//!
//! Decoding the text is the reader's job; by the time a value reaches
//! [`validate_envelope`] it is known to be well-formed JSON.

use serde_json::Value;
use thiserror::Error;

use crate::jsonrpc::{JsonRpcNotification, JsonRpcRequest, RequestId, JSONRPC_VERSION};

/// A validated JSON-RPC message.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Carries an id; exactly one response is owed.
    Request(JsonRpcRequest),
    /// No id (absent or `null`); no response is ever written.
    Notification(JsonRpcNotification),
}

impl Envelope {
    /// Method name of either variant.
    pub fn method(&self) -> &str {
        match self {
            Self::Request(r) => &r.method,
            Self::Notification(n) => &n.method,
        }
    }
}

/// Why an envelope was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Top level is an array, string, number, etc.
    #[error("request must be a JSON object")]
    NotAnObject,
    /// `jsonrpc` member absent.
    #[error("missing 'jsonrpc' member")]
    MissingVersion,
    /// `jsonrpc` present but not "2.0".
    #[error("unsupported jsonrpc version: {0}")]
    UnsupportedVersion(String),
    /// `method` member absent.
    #[error("missing 'method' member")]
    MissingMethod,
    /// `method` present but not a string.
    #[error("'method' must be a string")]
    MethodNotString,
    /// `id` present but neither an integer nor a string.
    #[error("'id' must be an integer or a string")]
    InvalidId,
    /// `params` present but not an object.
    #[error("'params' must be an object")]
    ParamsNotObject,
}

/// A rejected envelope, with the request id when it could be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct RejectedEnvelope {
    /// Id to echo in the error response, if one was readable.
    pub id: Option<RequestId>,
    /// The validation failure.
    pub error: EnvelopeError,
}

/// Validates the shape of a decoded JSON-RPC message.
///
/// `params: null` is treated as absent. A present-but-`null` id marks a
/// notification, the same as an absent one.
pub fn validate_envelope(value: Value) -> Result<Envelope, RejectedEnvelope> {
    let Value::Object(mut obj) = value else {
        return Err(reject(None, EnvelopeError::NotAnObject));
    };

    let raw_id = obj.remove("id").filter(|v| !v.is_null());
    let id = raw_id.as_ref().and_then(RequestId::from_value);

    match obj.get("jsonrpc") {
        None => return Err(reject(id, EnvelopeError::MissingVersion)),
        Some(Value::String(v)) if v == JSONRPC_VERSION => {}
        Some(other) => {
            let shown = other.as_str().map_or_else(|| other.to_string(), str::to_string);
            return Err(reject(id, EnvelopeError::UnsupportedVersion(shown)));
        }
    }

    let method = match obj.remove("method") {
        None => return Err(reject(id, EnvelopeError::MissingMethod)),
        Some(Value::String(m)) => m,
        Some(_) => return Err(reject(id, EnvelopeError::MethodNotString)),
    };

    if raw_id.is_some() && id.is_none() {
        return Err(reject(None, EnvelopeError::InvalidId));
    }

    let params = match obj.remove("params") {
        None | Some(Value::Null) => None,
        Some(p @ Value::Object(_)) => Some(p),
        Some(_) => return Err(reject(id, EnvelopeError::ParamsNotObject)),
    };

    let jsonrpc = JSONRPC_VERSION.to_string();
    Ok(match id {
        Some(id) => Envelope::Request(JsonRpcRequest {
            jsonrpc,
            id,
            method,
            params,
        }),
        None => Envelope::Notification(JsonRpcNotification {
            jsonrpc,
            method,
            params,
        }),
    })
}

fn reject(id: Option<RequestId>, error: EnvelopeError) -> RejectedEnvelope {
    RejectedEnvelope { id, error }
}
