//! Read, edit, export, and delete compiled version documents.

use std::path::{Path, PathBuf};

use tracing::info;

use super::resolve_version;
use crate::domain::{AppError, VersionName, VersionStats};
use crate::ports::VersionStore;

/// A compiled document and the version it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    pub version: VersionName,
    pub markdown: String,
}

/// Compile the document of a version. Missing versions yield the placeholder text.
pub fn show(
    store: &impl VersionStore,
    version: Option<VersionName>,
) -> Result<DocumentView, AppError> {
    let version = resolve_version(store, version)?.into_name();
    let markdown = store.aggregate_document(&version)?;
    Ok(DocumentView { version, markdown })
}

/// Per-category counts of a version.
pub fn stats(
    store: &impl VersionStore,
    version: Option<VersionName>,
) -> Result<(VersionName, VersionStats), AppError> {
    let version = resolve_version(store, version)?.into_name();
    let stats = store.stats(&version)?;
    Ok((version, stats))
}

/// Document of an existing version, ready to be edited.
///
/// Fails before any editing starts when the version does not exist.
pub fn editable(
    store: &impl VersionStore,
    version: Option<VersionName>,
) -> Result<DocumentView, AppError> {
    let view = show(store, version)?;
    if store.find_version(&view.version)?.is_none() {
        return Err(AppError::VersionNotFound(view.version.to_string()));
    }
    Ok(view)
}

/// Store a manually edited document for a version, replacing its tasks.
///
/// Blank text is rejected and leaves the version untouched.
pub fn edit(store: &impl VersionStore, version: &VersionName, text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Edited document is empty".into()));
    }
    store.replace_document(version, text)
}

/// Default export file name for a version: `release_notes_<version>.md`.
pub fn default_export_name(version: &VersionName) -> String {
    let safe: String = version
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    format!("release_notes_{safe}.md")
}

/// Write the compiled document to `output`, or to the default name inside `dir`.
pub fn export(
    store: &impl VersionStore,
    version: Option<VersionName>,
    output: Option<&Path>,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let view = show(store, version)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(default_export_name(&view.version)),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, &view.markdown)?;
    info!(version = %view.version, path = %path.display(), "exported document");
    Ok(path)
}

/// Delete a version and all of its tasks.
pub fn delete(store: &impl VersionStore, version: &VersionName) -> Result<(), AppError> {
    store.delete_version(version)
}

/// Return a manually edited version to task-compiled output.
pub fn reset(store: &impl VersionStore, version: &VersionName) -> Result<(), AppError> {
    store.clear_override(version)
}
