use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AppError;

/// Classification of a release-note entry.
///
/// Declaration order is the section order of the compiled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// New user-facing functionality.
    #[serde(rename = "User Story")]
    UserStory,
    /// Defect fix.
    Bug,
    /// Enhancement of existing behavior.
    Improvement,
    /// Internal rework with no direct feature.
    #[serde(rename = "Technical Debt")]
    TechnicalDebt,
}

impl Category {
    /// All categories in precedence order.
    pub const ALL: [Category; 4] =
        [Category::UserStory, Category::Bug, Category::Improvement, Category::TechnicalDebt];

    /// Label stored in the database and printed as the section header.
    pub fn label(&self) -> &'static str {
        match self {
            Category::UserStory => "User Story",
            Category::Bug => "Bug",
            Category::Improvement => "Improvement",
            Category::TechnicalDebt => "Technical Debt",
        }
    }

    /// 1-based position in the compiled document.
    pub fn rank(&self) -> u8 {
        match self {
            Category::UserStory => 1,
            Category::Bug => 2,
            Category::Improvement => 3,
            Category::TechnicalDebt => 4,
        }
    }

    /// Parse a category from its label or a short alias.
    pub fn from_label(label: &str) -> Option<Category> {
        let normalized = label.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "user story" | "userstory" | "story" => Some(Category::UserStory),
            "bug" | "fix" => Some(Category::Bug),
            "improvement" => Some(Category::Improvement),
            "technical debt" | "tech debt" | "debt" => Some(Category::TechnicalDebt),
            _ => None,
        }
    }

    /// Writing guidance handed to the model for this kind of entry.
    pub fn guidance(&self) -> &'static str {
        match self {
            Category::UserStory => {
                "Explain what was implemented, how it works from the user's point of view, and the benefit it brings."
            }
            Category::Bug => "Explain what the problem was and how it was solved.",
            Category::Improvement => {
                "Explain what was improved in existing behavior and what changes for the user."
            }
            Category::TechnicalDebt => {
                "Explain what was reworked internally and what it makes possible or more reliable."
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}
