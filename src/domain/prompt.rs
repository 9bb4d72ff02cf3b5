//! Prompt construction for release-note generation.

use minijinja::{Environment, UndefinedBehavior, context};

use super::{AppError, TaskEntry};

const PROMPT_TEMPLATE_NAME: &str = "release_note_prompt.j2";
const PROMPT_TEMPLATE: &str = include_str!("../templates/release_note_prompt.j2");

/// Render the instruction sent to the completion endpoint for one entry.
///
/// Output is deterministic for a given entry. The image line is omitted when
/// the entry has no image.
pub fn build_prompt(entry: &TaskEntry) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(PROMPT_TEMPLATE_NAME, PROMPT_TEMPLATE)
        .map_err(|err| AppError::PromptRender(err.to_string()))?;

    let template = env
        .get_template(PROMPT_TEMPLATE_NAME)
        .map_err(|err| AppError::PromptRender(err.to_string()))?;

    template
        .render(context! {
            ticket_id => &entry.ticket_id,
            category => entry.category.label(),
            title => &entry.title,
            description => &entry.description,
            image => &entry.image,
            guidance => entry.category.guidance(),
        })
        .map_err(|err| AppError::PromptRender(err.to_string()))
}
