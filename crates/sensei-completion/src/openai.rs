//! Client for OpenAI-compatible chat completion APIs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::service::{ChatMessage, CompletionService};

/// Longest upstream error message kept in [`CompletionError::Api`].
const MAX_ERROR_MESSAGE: usize = 200;

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct OpenAiSettings {
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token; `None` fails each call with `MissingCredential`.
    pub api_key: Option<String>,
    /// Sampling temperature sent with every request.
    pub temperature: f32,
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// `POST {base_url}/chat/completions` with Bearer auth.
///
/// A missing key is reported on the first call, not at construction, so
/// the server can start and answer catalog requests without one.
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::Transport` if the TLS backend cannot be
    /// initialized.
    pub fn new(settings: OpenAiSettings) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        let endpoint = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> Result<String, CompletionError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(CompletionError::MissingCredential)?;

        let body = ChatCompletionRequest {
            model,
            messages,
            temperature: self.settings.temperature,
        };

        tracing::debug!(model, messages = messages.len(), "sending completion request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, response).await);
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::InvalidResponse("no choices returned".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> CompletionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Authentication {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            CompletionError::RateLimited { retry_after }
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            CompletionError::Api {
                status: status.as_u16(),
                message: upstream_message(&text),
            }
        }
    }
}

/// Pulls `error.message` out of an OpenAI-style error body, falling back
/// to the raw text, truncated.
fn upstream_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    if message.is_empty() {
        return "no details".into();
    }
    match message.char_indices().nth(MAX_ERROR_MESSAGE) {
        Some((idx, _)) => format!("{}...", &message[..idx]),
        None => message,
    }
}

// --- Wire structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}
