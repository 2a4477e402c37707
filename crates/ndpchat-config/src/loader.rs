//! Configuration loading and validation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::AssistantConfig;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("no model API key: set GEMINI_API_KEY or model.api_key")]
    MissingApiKey,
}

/// Load the assistant configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AssistantConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AssistantConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AssistantConfig) -> Result<(), ConfigError> {
    if config.version == 0 {
        return Err(ConfigError::Invalid(
            "version must be greater than 0".to_string(),
        ));
    }

    if config.app.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "app.name must not be empty".to_string(),
        ));
    }

    if config.model.model.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "model.model must not be empty".to_string(),
        ));
    }

    if config.model.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "model.endpoint must not be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.model.temperature) {
        return Err(ConfigError::Invalid(
            "model.temperature must be within 0.0..=2.0".to_string(),
        ));
    }

    if config.catalog.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "catalog.endpoint must not be empty".to_string(),
        ));
    }

    Ok(())
}
