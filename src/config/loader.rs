//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AppConfig, HtmxConfig};
use crate::config::validation::{validate_config, validate_htmx, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate an application configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

impl AppConfig {
    /// Apply a command-line bind address and re-validate the result.
    pub fn with_bind_override(mut self, bind: Option<String>) -> Result<Self, ConfigError> {
        if let Some(bind) = bind {
            self.listener.bind_address = bind;
        }
        validate_config(&self).map_err(ConfigError::Validation)?;
        Ok(self)
    }
}

impl HtmxConfig {
    /// Parse and validate middleware settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HtmxConfig = toml::from_str(content)?;
        validate_htmx(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
