//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::{document, generate, versions};
use crate::services::{HttpCompletionClient, SqliteVersionStore};

pub use crate::app::commands::document::DocumentView;
pub use crate::app::commands::generate::{GenerateOutcome, GenerateRequest};
pub use crate::domain::{
    AppConfig, AppError, Category, TaskEntry, Version, VersionName, VersionStats, VersionSummary,
};

/// Open the SQLite store named by the configuration.
pub fn open_store(config: &AppConfig) -> Result<SqliteVersionStore, AppError> {
    SqliteVersionStore::open(&config.storage.database)
}

/// Generate a release-note entry, saving it unless `request.save` is false.
pub fn generate(config: &AppConfig, request: GenerateRequest) -> Result<GenerateOutcome, AppError> {
    let store = open_store(config)?;
    let client = HttpCompletionClient::from_env_with_config(&config.completion)?;
    let ctx = AppContext::new(store, client);
    generate::execute(&ctx, request)
}

/// Compile the document of a version.
pub fn show(config: &AppConfig, version: Option<VersionName>) -> Result<DocumentView, AppError> {
    document::show(&open_store(config)?, version)
}

/// Per-category counts of a version.
pub fn stats(
    config: &AppConfig,
    version: Option<VersionName>,
) -> Result<(VersionName, VersionStats), AppError> {
    document::stats(&open_store(config)?, version)
}

/// Document of an existing version, for editing. Fails when the version is missing.
pub fn editable(
    config: &AppConfig,
    version: Option<VersionName>,
) -> Result<DocumentView, AppError> {
    document::editable(&open_store(config)?, version)
}

/// Replace a version's document with manually edited text.
pub fn edit(config: &AppConfig, version: &VersionName, text: &str) -> Result<(), AppError> {
    document::edit(&open_store(config)?, version, text)
}

/// Write a version's document to a Markdown file in the current directory or at `output`.
pub fn export(
    config: &AppConfig,
    version: Option<VersionName>,
    output: Option<&Path>,
) -> Result<PathBuf, AppError> {
    let dir = std::env::current_dir()?;
    document::export(&open_store(config)?, version, output, &dir)
}

/// Delete a version and its tasks.
pub fn delete(config: &AppConfig, version: &VersionName) -> Result<(), AppError> {
    document::delete(&open_store(config)?, version)
}

/// Drop a manual edit so the document is compiled from tasks again.
pub fn reset(config: &AppConfig, version: &VersionName) -> Result<(), AppError> {
    document::reset(&open_store(config)?, version)
}

/// List versions, newest first.
pub fn list_versions(config: &AppConfig) -> Result<Vec<VersionSummary>, AppError> {
    versions::list(&open_store(config)?)
}

/// Create a version and make it active.
pub fn create_version(config: &AppConfig, name: &VersionName) -> Result<Version, AppError> {
    versions::create(&open_store(config)?, name)
}

/// Delete every version and task.
pub fn purge(config: &AppConfig) -> Result<(), AppError> {
    versions::purge(&open_store(config)?)
}
