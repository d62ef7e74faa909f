//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::history::BASE_URL_ENV;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse, apply environment overrides and validate.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    parse_config_with(content, env::var(BASE_URL_ENV).ok())
}

/// As [`parse_config`], with the `BASE_URL` value passed in.
pub fn parse_config_with(content: &str, env_base: Option<String>) -> Result<SiteConfig, ConfigError> {
    let mut config: SiteConfig = toml::from_str(content)?;
    apply_env_from(&mut config, env_base);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = ?path, "Configuration file loaded");
    Ok(config)
}

/// Load from `path` when given, otherwise defaults plus environment.
pub fn load_or_default(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => parse_config(""),
    }
}

/// `BASE_URL` takes precedence over `site.base_url`.
pub fn apply_env_from(config: &mut SiteConfig, env_base: Option<String>) {
    if let Some(base) = env_base {
        config.site.base_url = base;
    }
}

/// A command-line base wins over both `BASE_URL` and the file.
pub fn with_base_override(
    mut config: SiteConfig,
    base: Option<&str>,
) -> Result<SiteConfig, ConfigError> {
    if let Some(base) = base {
        config.site.base_url = base.to_string();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}
