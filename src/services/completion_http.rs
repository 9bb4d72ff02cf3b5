//! Chat-completion client implementation using reqwest.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{AppError, CompletionConfig, clean_completion};
use crate::ports::CompletionClient;

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct HttpCompletionClient {
    api_key: String,
    api_url: Url,
    model: String,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    reasoning_effort: String,
    client: Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &CompletionConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
            top_p: config.top_p,
            reasoning_effort: config.reasoning_effort.clone(),
            client,
        })
    }

    /// Create from the environment variable named in the configuration.
    pub fn from_env_with_config(config: &CompletionConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::MissingApiKey(config.api_key_env.clone()))?;

        Self::new(api_key, config)
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    reasoning_effort: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![ApiMessage { role: "user", content: prompt }],
            temperature: self.temperature,
            max_completion_tokens: self.max_completion_tokens,
            top_p: self.top_p,
            reasoning_effort: &self.reasoning_effort,
        };

        debug!(
            url = %self.api_url,
            model = %self.model,
            prompt_chars = prompt.len(),
            "requesting completion"
        );

        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(|e| AppError::CompletionTransport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(AppError::CompletionFailed { status: status.as_u16(), body });
        }

        let api_response: ApiResponse = response.json().map_err(|e| {
            AppError::MalformedCompletion(format!("Failed to parse response: {}", e))
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::MalformedCompletion("No message content in response".into()))?;

        let cleaned = clean_completion(&content);
        debug!(chars = cleaned.len(), "completion received");
        Ok(cleaned)
    }
}
