//! Generate a release-note entry and optionally save it to a version.

use serde::Serialize;
use tracing::info;

use super::{ResolvedVersion, resolve_version};
use crate::app::AppContext;
use crate::domain::{AppError, TaskEntry, TaskRecord, VersionName, build_prompt, render_body};
use crate::ports::{CompletionClient, VersionStore};

/// One form submission.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Target version; the active (or a dated) version when `None`.
    pub version: Option<VersionName>,
    pub entry: TaskEntry,
    /// Persist the entry. When false the body is only previewed.
    pub save: bool,
}

/// Result of a generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub version: String,
    /// Rendered Markdown block for the entry.
    pub body: String,
    /// Stored row, when saved.
    pub record: Option<TaskRecord>,
    /// Compiled document of the version after saving.
    pub document: Option<String>,
}

/// Generate the entry body with one completion call.
///
/// A failed completion leaves the store untouched.
pub fn execute<S, C>(
    ctx: &AppContext<S, C>,
    request: GenerateRequest,
) -> Result<GenerateOutcome, AppError>
where
    S: VersionStore,
    C: CompletionClient,
{
    let entry = request.entry.normalized()?;
    let resolved = resolve_version(ctx.store(), request.version)?;

    let prompt = build_prompt(&entry)?;
    info!(ticket = %entry.ticket_id, category = %entry.category, "generating release note");
    let description = ctx.client().complete(&prompt)?;
    if description.is_empty() {
        return Err(AppError::MalformedCompletion("Completion was empty".into()));
    }
    let body = render_body(&entry, &description);

    if !request.save {
        return Ok(GenerateOutcome {
            version: resolved.name().to_string(),
            body,
            record: None,
            document: None,
        });
    }

    if let ResolvedVersion::Dated(name) = &resolved {
        ctx.store().create_active_version(name)?;
    }
    let version = resolved.into_name();
    let record = ctx.store().upsert_task(&version, &entry, &body)?;
    let document = ctx.store().aggregate_document(&version)?;

    Ok(GenerateOutcome {
        version: version.to_string(),
        body,
        record: Some(record),
        document: Some(document),
    })
}
