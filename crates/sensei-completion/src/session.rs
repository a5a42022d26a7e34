//! Conversation state for the interactive chat loop.

use crate::error::CompletionError;
use crate::service::{ChatMessage, CompletionService};

/// Ordered message history owned by one chat loop.
///
/// The dispatcher never sees this; each `tools/call` is a fresh,
/// single-message conversation.
#[derive(Debug, Default, Clone)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Starts an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages exchanged so far, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// True before the first successful exchange or after a reset.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drops all history.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Sends `input` with the full history and records the exchange.
    ///
    /// On failure the history is left as it was before the call.
    pub async fn send(
        &mut self,
        service: &dyn CompletionService,
        model: &str,
        input: &str,
    ) -> Result<String, CompletionError> {
        self.history.push(ChatMessage::user(input));
        match service.complete(&self.history, model).await {
            Ok(reply) => {
                self.history.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}
