//! Layering tests for `load_config`.

use std::path::Path;

use figment::Jail;
use sensei_config::{load_config, ConfigError};

#[test]
fn file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "sensei.toml",
            r#"
[server]
name = "dojo"

[completion]
model = "gpt-4o-mini"
timeout_secs = 30
"#,
        )?;
        let config = load_config(Some(Path::new("sensei.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(config.server.name, "dojo");
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.timeout_secs, 30);
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("sensei.toml", "[completion]\nmodel = \"from-file\"\n")?;
        jail.set_env("SENSEI_COMPLETION__MODEL", "from-env");
        jail.set_env("SENSEI_COMPLETION__BASE_URL", "http://localhost:8080/v1");
        let config = load_config(Some(Path::new("sensei.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(config.completion.model, "from-env");
        assert_eq!(config.completion.base_url, "http://localhost:8080/v1");
        Ok(())
    });
}

#[test]
fn openai_api_key_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-from-openai");
        let config = load_config(None).map_err(|e| e.to_string())?;
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-from-openai"));
        Ok(())
    });
}

#[test]
fn prefixed_api_key_wins_over_openai_key() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-generic");
        jail.set_env("SENSEI_COMPLETION__API_KEY", "sk-specific");
        let config = load_config(None).map_err(|e| e.to_string())?;
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-specific"));
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = load_config(Some(Path::new("absent.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::NotFound(_)));
        Ok(())
    });
}

#[test]
fn unknown_section_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("sensei.toml", "[database]\npath = \"x\"\n")?;
        let err = load_config(Some(Path::new("sensei.toml"))).expect_err("unknown");
        assert!(matches!(err, ConfigError::Load(_)));
        Ok(())
    });
}

#[test]
fn zero_timeout_is_invalid() {
    Jail::expect_with(|jail| {
        jail.set_env("SENSEI_COMPLETION__TIMEOUT_SECS", "0");
        let err = load_config(None).expect_err("zero");
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    });
}

#[test]
fn unrelated_prefixed_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SENSEI_HOME", "/opt/sensei");
        jail.set_env("SENSEI_DEBUG", "1");
        jail.set_env("SENSEI_LOGGING__LEVEL", "debug");
        let config = load_config(None).map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.name, "sensei");
        Ok(())
    });
}
