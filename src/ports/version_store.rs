//! Version store port definition.

use crate::domain::{
    AppError, TaskEntry, TaskRecord, Version, VersionName, VersionSnapshot, VersionStats,
    VersionSummary, aggregate,
};

/// Persistence for release versions and their tasks.
pub trait VersionStore {
    /// Look up a version without creating it.
    fn find_version(&self, name: &VersionName) -> Result<Option<Version>, AppError>;

    /// Look up a version, creating it inactive when absent.
    fn get_or_create_version(&self, name: &VersionName) -> Result<Version, AppError>;

    /// The version flagged active, if any.
    fn active_version(&self) -> Result<Option<Version>, AppError>;

    /// Deactivate every version and make `name` the active one, creating it if needed.
    fn create_active_version(&self, name: &VersionName) -> Result<Version, AppError>;

    /// Insert a task, replacing any task with the same ticket id in the version.
    ///
    /// The version is created when it does not exist yet.
    fn upsert_task(
        &self,
        version: &VersionName,
        entry: &TaskEntry,
        body: &str,
    ) -> Result<TaskRecord, AppError>;

    /// Tasks of a version ordered by category precedence, then insertion time.
    fn list_tasks(&self, version: &VersionName) -> Result<Vec<TaskRecord>, AppError>;

    /// Per-category counts. A missing version yields empty stats.
    fn stats(&self, version: &VersionName) -> Result<VersionStats, AppError>;

    /// Replace the whole document with manually edited text.
    ///
    /// Deletes every task of the version. Fails when the version does not exist.
    fn replace_document(&self, version: &VersionName, text: &str) -> Result<(), AppError>;

    /// Drop a manual override so the document is compiled from tasks again.
    fn clear_override(&self, version: &VersionName) -> Result<(), AppError>;

    /// Delete a version and all of its tasks. Fails when the version does not exist.
    fn delete_version(&self, name: &VersionName) -> Result<(), AppError>;

    /// All versions, newest first, with task counts.
    fn list_versions(&self) -> Result<Vec<VersionSummary>, AppError>;

    /// Delete every task and version.
    fn purge(&self) -> Result<(), AppError>;

    /// Read a version and its ordered tasks.
    fn snapshot(&self, name: &VersionName) -> Result<Option<VersionSnapshot>, AppError> {
        let Some(version) = self.find_version(name)? else {
            return Ok(None);
        };
        let tasks = self.list_tasks(name)?;
        Ok(Some(VersionSnapshot { version, tasks }))
    }

    /// Compile the Markdown document of a version.
    fn aggregate_document(&self, name: &VersionName) -> Result<String, AppError> {
        let snapshot = self.snapshot(name)?;
        Ok(aggregate(snapshot.as_ref()))
    }
}
