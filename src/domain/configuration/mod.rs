pub mod app_config;
pub mod loader;

pub use app_config::{AppConfig, CompletionConfig, StorageConfig};
pub use loader::{TEMPERATURE_ENV, apply_env_overrides, parse_config_content};
