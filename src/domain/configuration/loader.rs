//! Configuration parsing and environment overrides.

use crate::domain::{AppConfig, AppError};

/// Environment variable overriding `completion.temperature`.
pub const TEMPERATURE_ENV: &str = "TEMPERATURE";

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides read through `lookup`, then re-validate.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(TEMPERATURE_ENV) {
        let temperature = raw.trim().parse::<f32>().map_err(|_| {
            AppError::InvalidConfig(format!("{} must be a number, got '{}'", TEMPERATURE_ENV, raw))
        })?;
        config.completion.temperature = temperature;
    }
    config.validate()?;
    Ok(config)
}
