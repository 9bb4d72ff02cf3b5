//! Release-note task entries and their rendered Markdown bodies.

use serde::Serialize;

use super::{AppError, Category};

/// Form input describing one unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    pub category: Category,
    /// External ticket identifier, e.g. `JBSV-3263`.
    pub ticket_id: String,
    pub title: String,
    pub description: String,
    /// Evidence image filename; only the name is recorded.
    pub image: Option<String>,
}

impl TaskEntry {
    /// Trim text fields and reject entries with missing required fields.
    pub fn normalized(self) -> Result<Self, AppError> {
        let ticket_id = self.ticket_id.trim().to_string();
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let image = self.image.map(|name| name.trim().to_string()).filter(|name| !name.is_empty());

        if ticket_id.is_empty() {
            return Err(AppError::Validation("Task ID must not be empty".into()));
        }
        if ticket_id.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(format!(
                "Task ID '{}' must not contain whitespace",
                ticket_id
            )));
        }
        if title.is_empty() {
            return Err(AppError::Validation("Task title must not be empty".into()));
        }
        if description.is_empty() {
            return Err(AppError::Validation("Task description must not be empty".into()));
        }
        if let Some(name) = &image {
            if name.contains('/') || name.contains('\\') {
                return Err(AppError::Validation(format!(
                    "Image '{}' must be a file name, not a path",
                    name
                )));
            }
        }

        Ok(Self { category: self.category, ticket_id, title, description, image })
    }
}

/// A task row as stored in a version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub id: i64,
    pub version_id: i64,
    pub ticket_id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    /// Rendered Markdown block for the compiled document.
    pub body: String,
    pub image: Option<String>,
    pub created_at_ms: i64,
}

/// Markdown image reference for an attachment uploaded next to the document.
pub fn image_reference(name: &str) -> String {
    format!("![{name}](/.attachments/{name} =300x)")
}

/// Render the Markdown block stored for one task.
///
/// `###[<id>] <title>`, the generated description, the optional image
/// reference, and a closing `---`, separated by blank lines.
pub fn render_body(entry: &TaskEntry, description: &str) -> String {
    let mut body = format!("###[{}] {}\n\n{}", entry.ticket_id, entry.title, description.trim());
    if let Some(image) = &entry.image {
        body.push_str("\n\n");
        body.push_str(&image_reference(image));
    }
    body.push_str("\n\n---");
    body
}
