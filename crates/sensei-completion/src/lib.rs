//! # sensei-completion
//!
//! The language-model collaborator: the [`CompletionService`] trait the
//! dispatcher depends on, an OpenAI-compatible HTTP implementation, and
//! the [`ChatSession`] history used by `sensei chat`.

pub mod error;
pub mod openai;
pub mod service;
pub mod session;

pub use error::CompletionError;
pub use openai::{OpenAiClient, OpenAiSettings};
pub use service::{ChatMessage, ChatRole, CompletionService};
pub use session::ChatSession;
