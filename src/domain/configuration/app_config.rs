//! Application configuration domain models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `relnotes.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Completion endpoint configuration.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Local storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.completion.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Chat-completion endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// OpenAI-compatible chat-completion URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens.
    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,
    /// Nucleus sampling mass.
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Reasoning effort hint for reasoning models.
    #[serde(default = "default_reasoning_effort")]
    pub reasoning_effort: String,
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_completion_tokens: default_max_completion_tokens(),
            top_p: default_top_p(),
            reasoning_effort: default_reasoning_effort(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidConfig(
                "temperature must be between 0 and 2".to_string(),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(AppError::InvalidConfig("top_p must be in (0, 1]".to_string()));
        }
        if self.max_completion_tokens == 0 {
            return Err(AppError::InvalidConfig(
                "max_completion_tokens must be greater than 0".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.reasoning_effort.trim().is_empty() {
            return Err(AppError::InvalidConfig("reasoning_effort must not be empty".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(AppError::InvalidConfig("api_key_env must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.groq.com/openai/v1/chat/completions")
        .expect("Default API URL must be valid")
}

fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_temperature() -> f32 {
    0.6
}

fn default_max_completion_tokens() -> u32 {
    8192
}

fn default_top_p() -> f32 {
    1.0
}

fn default_reasoning_effort() -> String {
    "medium".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Database file path, relative to the working directory unless absolute.
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { database: default_database() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("database must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("release_notes.db")
}
