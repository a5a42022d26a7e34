//! Completion service errors.

use sensei_types::DiagnosticError;
use thiserror::Error;

/// Failures talking to the completion service.
///
/// No variant ever carries the credential. Authentication failures keep
/// only the status code since upstream bodies may echo part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No API key configured.
    #[error("no completion API key configured")]
    MissingCredential,
    /// The service rejected the credential.
    #[error("completion service rejected the credential (HTTP {status})")]
    Authentication { status: u16 },
    /// The service throttled the request.
    #[error("completion service rate limit reached")]
    RateLimited { retry_after: Option<u64> },
    /// Any other non-success HTTP status.
    #[error("completion service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// Connection-level failure.
    #[error("cannot reach completion service: {0}")]
    Transport(String),
    /// The response body did not have the expected shape.
    #[error("unexpected completion response: {0}")]
    InvalidResponse(String),
}

impl DiagnosticError for CompletionError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::MissingCredential => {
                Some("No API key was found in the environment or config.".into())
            }
            Self::Authentication { .. } => Some("The API key is invalid or revoked.".into()),
            Self::RateLimited { retry_after: Some(secs) } => {
                Some(format!("The service asked to retry after {secs}s."))
            }
            Self::RateLimited { retry_after: None } => None,
            Self::Transport(_) => Some("The completion endpoint is unreachable.".into()),
            Self::Api { .. } | Self::InvalidResponse(_) => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::MissingCredential | Self::Authentication { .. } => {
                Some("Set OPENAI_API_KEY or completion.api_key in sensei.toml".into())
            }
            Self::Transport(_) => Some("Check completion.base_url and your network".into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_point_at_the_key() {
        let e = CompletionError::Authentication { status: 401 };
        assert!(e.hint().expect("hint").contains("API key"));
        assert!(e.fix().expect("fix").contains("OPENAI_API_KEY"));
        assert!(!e.to_string().contains("sk-"));
    }

    #[test]
    fn rate_limit_hint_mentions_delay() {
        let e = CompletionError::RateLimited { retry_after: Some(7) };
        assert!(e.hint().expect("hint").contains("7s"));
    }

    #[test]
    fn missing_credential_has_fix() {
        assert!(CompletionError::MissingCredential
            .fix()
            .expect("fix")
            .contains("OPENAI_API_KEY"));
    }
}
