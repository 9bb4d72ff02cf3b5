//! Compilation of a version's tasks into one Markdown document.

use super::{Category, TaskRecord, Version};

/// Table-of-contents marker understood by the wiki the document is pasted into.
pub const TOC_MARKER: &str = "[[_TOC_]]";

/// Returned when the requested version does not exist.
pub const MISSING_VERSION_PLACEHOLDER: &str = "No tasks added yet for this version.";

/// Returned when the version exists but holds no tasks.
pub const EMPTY_DOCUMENT: &str = "[[_TOC_]]\n\n---\n\n*No tasks added yet*";

/// A version together with its tasks, as read from the store.
#[derive(Debug, Clone)]
pub struct VersionSnapshot {
    pub version: Version,
    pub tasks: Vec<TaskRecord>,
}

/// Compile the document for a version.
///
/// A manual override is returned verbatim. Otherwise task bodies are grouped
/// under `##<Category>` headers in category precedence order, keeping the
/// given task order within each category.
pub fn aggregate(snapshot: Option<&VersionSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return MISSING_VERSION_PLACEHOLDER.to_string();
    };

    if let Some(text) = &snapshot.version.override_text {
        return text.clone();
    }

    if snapshot.tasks.is_empty() {
        return EMPTY_DOCUMENT.to_string();
    }

    let mut markdown = format!("{TOC_MARKER}\n\n---\n\n");
    for category in Category::ALL {
        let mut section = snapshot.tasks.iter().filter(|task| task.category == category).peekable();
        if section.peek().is_none() {
            continue;
        }
        markdown.push_str(&format!("##{}\n", category.label()));
        for task in section {
            markdown.push_str(&task.body);
            markdown.push_str("\n\n");
        }
    }

    let mut document = markdown.trim_end().to_string();
    document.push('\n');
    document
}
