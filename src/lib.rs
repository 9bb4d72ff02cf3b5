//! relnotes: generate release-note entries with an LLM and compile them into
//! versioned Markdown documents.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DocumentView, GenerateOutcome, GenerateRequest, create_version, delete, edit, export,
    generate, list_versions, open_store, purge, reset, show, stats,
};
pub use domain::{AppConfig, AppError, Category, TaskEntry, VersionName};
