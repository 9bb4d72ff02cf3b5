pub mod category;
pub mod completion;
pub mod configuration;
pub mod document;
pub mod error;
pub mod prompt;
pub mod task;
pub mod version;

pub use category::Category;
pub use completion::clean_completion;
pub use configuration::{
    AppConfig, CompletionConfig, StorageConfig, apply_env_overrides, parse_config_content,
};
pub use document::{
    EMPTY_DOCUMENT, MISSING_VERSION_PLACEHOLDER, TOC_MARKER, VersionSnapshot, aggregate,
};
pub use error::AppError;
pub use prompt::build_prompt;
pub use task::{TaskEntry, TaskRecord, image_reference, render_body};
pub use version::{Version, VersionName, VersionStats, VersionSummary};
