//! Completion client port definition.

use crate::domain::AppError;

/// Port for single-shot text generation.
pub trait CompletionClient {
    /// Send one prompt and return the cleaned completion text.
    ///
    /// Any failure is final; implementations do not retry.
    fn complete(&self, prompt: &str) -> Result<String, AppError>;
}
