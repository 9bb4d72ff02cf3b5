//! Interactive completion of the generation form.

use std::io::ErrorKind;
use std::path::PathBuf;

use dialoguer::{Editor, Error as DialoguerError, Input, Select};

use super::prompt_error;
use crate::domain::{AppError, Category, TaskEntry};

/// Form fields as given on the command line.
pub(super) struct FormFields {
    pub category: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub description_file: Option<PathBuf>,
    pub image: Option<String>,
}

/// Build an entry from the given fields, asking for the missing ones.
///
/// Returns `None` when the user cancels a prompt.
pub(super) fn complete_entry(fields: FormFields) -> Result<Option<TaskEntry>, AppError> {
    let category = match fields.category {
        Some(raw) => raw.parse::<Category>()?,
        None => match prompt_category()? {
            Some(category) => category,
            None => return Ok(None),
        },
    };

    let ticket_id = match fields.id {
        Some(id) => id,
        None => match prompt_text("Task ID (e.g. JBSV-3048)")? {
            Some(id) => id,
            None => return Ok(None),
        },
    };

    let title = match fields.title {
        Some(title) => title,
        None => match prompt_text("Task title")? {
            Some(title) => title,
            None => return Ok(None),
        },
    };

    let description = match (fields.description, fields.description_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (None, None) => match prompt_description()? {
            Some(text) => text,
            None => return Ok(None),
        },
    };

    Ok(Some(TaskEntry { category, ticket_id, title, description, image: fields.image }))
}

fn prompt_category() -> Result<Option<Category>, AppError> {
    let items: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
    let selection = Select::new()
        .with_prompt("Select category")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(selection.map(|index| Category::ALL[index]))
}

fn prompt_text(prompt: &str) -> Result<Option<String>, AppError> {
    match Input::<String>::new().with_prompt(prompt).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(prompt_error(err)),
    }
}

fn prompt_description() -> Result<Option<String>, AppError> {
    Editor::new().extension(".md").edit("").map_err(prompt_error)
}
