use crate::domain::AppError;
use crate::ports::CompletionClient;
use std::sync::{Arc, Mutex};

/// Completion client that records prompts and replays a canned outcome.
#[derive(Clone)]
pub struct FakeCompletionClient {
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub response: Result<String, (u16, String)>,
}

impl FakeCompletionClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self { prompts: Arc::new(Mutex::new(vec![])), response: Ok(response.into()) }
    }

    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self { prompts: Arc::new(Mutex::new(vec![])), response: Err((status, body.into())) }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => {
                Err(AppError::CompletionFailed { status: *status, body: body.clone() })
            }
        }
    }
}
