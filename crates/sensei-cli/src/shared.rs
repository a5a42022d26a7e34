//! Shared helpers used across CLI commands.
//!
//! Centralises loading the catalog and building the completion client so
//! every command sees the same defaults.

use std::path::Path;
use std::sync::Arc;

use sensei_catalog::Catalog;
use sensei_completion::{OpenAiClient, OpenAiSettings};
use sensei_config::schema::CompletionConfig;
use sensei_config::SenseiConfig;
use sensei_transport_stdio::HandlerConfig;

use crate::output;

/// Loads the catalog from `path`, or the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Arc<Catalog>> {
    let catalog = match path {
        Some(p) => sensei_catalog::load_catalog_file(p),
        None => Catalog::builtin(),
    }
    .map_err(|e| {
        output::print_diagnostic(&e);
        anyhow::anyhow!("catalog error: {e}")
    })?;

    tracing::debug!(
        source = %path.map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
        tools = catalog.tools().len(),
        prompts = catalog.prompts().len(),
        resources = catalog.resources().len(),
        "catalog loaded"
    );
    Ok(Arc::new(catalog))
}

/// Builds the completion client from configuration.
///
/// A missing API key is not an error here; it surfaces on the first call.
pub fn create_completion(config: &CompletionConfig) -> anyhow::Result<Arc<OpenAiClient>> {
    if config.api_key.is_none() {
        tracing::warn!("no completion API key configured; tools/call will fail until one is set");
    }
    let client = OpenAiClient::new(OpenAiSettings {
        base_url: config.base_url.clone(),
        api_key: config.api_key.clone(),
        temperature: config.temperature,
    })
    .map_err(|e| anyhow::anyhow!("completion client init error: {e}"))?;
    Ok(Arc::new(client))
}

/// Maps configuration onto the dispatcher's settings.
pub fn handler_config(config: &SenseiConfig) -> HandlerConfig {
    HandlerConfig {
        server_name: config.server.name.clone(),
        model: config.completion.model.clone(),
        completion_timeout: config.completion.timeout(),
    }
}
