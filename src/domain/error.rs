use std::io;

use thiserror::Error;

/// Library-wide error type for relnotes operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// API key environment variable is unset or empty.
    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    /// Form input rejected before any remote call.
    #[error("{0}")]
    Validation(String),

    /// Category label not in the canonical enumeration.
    #[error(
        "Invalid category '{0}': must be one of User Story, Bug, Improvement, Technical Debt"
    )]
    InvalidCategory(String),

    /// Version name is empty or malformed.
    #[error("Invalid version name '{0}'")]
    InvalidVersionName(String),

    /// Named version does not exist.
    #[error("Version '{0}' not found")]
    VersionNotFound(String),

    /// Prompt template failed to render.
    #[error("Prompt rendering failed: {0}")]
    PromptRender(String),

    /// Completion endpoint answered with a non-success status.
    #[error("Completion API error ({status}): {body}")]
    CompletionFailed { status: u16, body: String },

    /// Completion request never produced a response.
    #[error("Completion request failed: {0}")]
    CompletionTransport(String),

    /// Completion response did not carry the expected message content.
    #[error("Malformed completion response: {0}")]
    MalformedCompletion(String),

    /// SQLite failure.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// JSON output could not be produced.
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_failure_carries_status_and_body() {
        let err = AppError::CompletionFailed { status: 401, body: "invalid api key".into() };
        assert_eq!(err.to_string(), "Completion API error (401): invalid api key");
    }

    #[test]
    fn missing_version_names_the_version() {
        let err = AppError::VersionNotFound("v1.0.0".into());
        assert_eq!(err.to_string(), "Version 'v1.0.0' not found");
    }

    #[test]
    fn json_failures_convert_to_json_variant() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(source);
        assert!(matches!(err, AppError::Json(_)));
        assert!(err.to_string().starts_with("JSON rendering failed:"));
    }

    #[test]
    fn io_failures_keep_their_kind() {
        let err = AppError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        match err {
            AppError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
