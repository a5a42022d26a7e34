//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::SenseiConfig;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
    /// Values parsed but are out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Env keys (prefix stripped) that map onto a config section.
const ENV_SECTIONS: [&str; 3] = ["server__", "completion__", "logging__"];

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. `OPENAI_API_KEY` as `completion.api_key`
/// 4. Environment variables (`SENSEI_` prefix, `__` between sections,
///    e.g. `SENSEI_COMPLETION__MODEL`). Variables outside the known
///    sections, such as `SENSEI_HOME`, are ignored.
pub fn load_config(config_path: Option<&Path>) -> Result<SenseiConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(SenseiConfig::default()));

    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment
        .merge(
            Env::raw()
                .only(&["OPENAI_API_KEY"])
                .map(|_| "completion.api_key".into()),
        )
        .merge(
            Env::prefixed("SENSEI_")
                .filter(|key| {
                    let key = key.as_str().to_ascii_lowercase();
                    ENV_SECTIONS.iter().any(|section| key.starts_with(section))
                })
                .split("__"),
        );

    let config: SenseiConfig = figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SenseiConfig) -> Result<(), ConfigError> {
    let c = &config.completion;
    if c.timeout_secs == 0 {
        return Err(ConfigError::Invalid("completion.timeout_secs must be positive".into()));
    }
    if !(0.0..=2.0).contains(&c.temperature) {
        return Err(ConfigError::Invalid(format!(
            "completion.temperature must be between 0 and 2, got {}",
            c.temperature
        )));
    }
    if c.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("completion.base_url cannot be empty".into()));
    }
    Ok(())
}
