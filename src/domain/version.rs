use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{AppError, Category};

/// A validated release version name such as `v4.21.0`.
///
/// Guarantees:
/// - Surrounding whitespace trimmed
/// - Non-empty
/// - No control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionName(String);

impl VersionName {
    pub fn new(name: &str) -> Result<Self, AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return Err(AppError::InvalidVersionName(name.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Name used when no version is given and none is active, e.g. `v2025.03.14`.
    pub fn dated(date: NaiveDate) -> Self {
        Self(format!("v{}", date.format("%Y.%m.%d")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VersionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored release version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Version {
    pub id: i64,
    pub name: String,
    pub created_at_ms: i64,
    pub is_active: bool,
    /// Whole-document text written by a manual edit. Wins over task rows when set.
    pub override_text: Option<String>,
}

/// One row of the version listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionSummary {
    pub name: String,
    pub created_at_ms: i64,
    pub is_active: bool,
    pub task_count: usize,
}

impl VersionSummary {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at_ms)
    }
}

/// Per-category task counts for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionStats {
    pub total: usize,
    pub user_stories: usize,
    pub bugs: usize,
    pub improvements: usize,
    pub technical_debts: usize,
    /// Whether the compiled document is a manual override.
    pub overridden: bool,
}

impl VersionStats {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::UserStory => self.user_stories,
            Category::Bug => self.bugs,
            Category::Improvement => self.improvements,
            Category::TechnicalDebt => self.technical_debts,
        }
    }

    pub fn record(&mut self, category: Category, count: usize) {
        let slot = match category {
            Category::UserStory => &mut self.user_stories,
            Category::Bug => &mut self.bugs,
            Category::Improvement => &mut self.improvements,
            Category::TechnicalDebt => &mut self.technical_debts,
        };
        *slot += count;
        self.total += count;
    }
}
