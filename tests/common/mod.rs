//! Shared testing utilities for relnotes CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const API_PATH: &str = "/openai/v1/chat/completions";

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `relnotes` binary with an API key set.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("relnotes").expect("Failed to locate relnotes binary");
        cmd.current_dir(&self.work_dir)
            .env("GROQ_API_KEY", "test-key")
            .env_remove("TEMPERATURE")
            .env("RUST_LOG", "off");
        cmd
    }

    /// Point the completion endpoint at a mock server via `relnotes.toml`.
    pub fn write_config(&self, server_url: &str) {
        let content = format!(
            "[completion]\napi_url = \"{}{}\"\n\n[storage]\ndatabase = \"data/notes.db\"\n",
            server_url, API_PATH
        );
        fs::write(self.work_dir.join("relnotes.toml"), content)
            .expect("Failed to write relnotes.toml");
    }

    /// Path of the database configured by `write_config`.
    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join("data/notes.db")
    }

    /// Read a file relative to the work directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read file")
    }
}

/// Chat-completion response body carrying `content`.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}
