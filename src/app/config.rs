//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppConfig, AppError, apply_env_overrides, parse_config_content};

/// Configuration file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "relnotes.toml";

/// Load configuration from `explicit`, or from `relnotes.toml` in `dir` when present.
///
/// An explicit path must exist. Without any file the defaults apply. Environment
/// overrides are applied last.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<AppConfig, AppError> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => Some(dir.join(CONFIG_FILE_NAME)).filter(|candidate| candidate.exists()),
    };

    let config = match &path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            parse_config_content(&std::fs::read_to_string(path)?)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}
