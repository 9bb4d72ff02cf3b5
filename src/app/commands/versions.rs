//! Version management commands.

use crate::domain::{AppError, Version, VersionName, VersionSummary};
use crate::ports::VersionStore;

/// All versions, newest first.
pub fn list(store: &impl VersionStore) -> Result<Vec<VersionSummary>, AppError> {
    store.list_versions()
}

/// Create (or reactivate) a version and make it the active one.
pub fn create(store: &impl VersionStore, name: &VersionName) -> Result<Version, AppError> {
    store.create_active_version(name)
}

/// Delete every version and task.
pub fn purge(store: &impl VersionStore) -> Result<(), AppError> {
    store.purge()
}
