//! The completion collaborator seen by the dispatcher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Typed by the person at the keyboard or rendered from a tool instruction.
    User,
    /// Returned by the completion service.
    Assistant,
}

/// One message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// A message from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// A reply previously produced by the service.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Text generation backend.
///
/// Implementations must be shareable across tasks; the dispatcher holds
/// one behind an `Arc` for the life of the process.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generates a reply to `messages` with the given model.
    ///
    /// An empty string is a valid reply.
    async fn complete(&self, messages: &[ChatMessage], model: &str)
        -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).expect("ser");
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
        let json = serde_json::to_value(ChatMessage::assistant("ok")).expect("ser");
        assert_eq!(json["role"], "assistant");
    }
}
