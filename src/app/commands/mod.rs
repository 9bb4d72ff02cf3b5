pub mod document;
pub mod generate;
pub mod versions;

use chrono::Local;

use crate::domain::{AppError, VersionName};
use crate::ports::VersionStore;

/// How the target version of a command was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// Named by the caller.
    Explicit(VersionName),
    /// The version currently flagged active.
    Active(VersionName),
    /// No version given and none active: a dated name for today.
    Dated(VersionName),
}

impl ResolvedVersion {
    pub fn name(&self) -> &VersionName {
        match self {
            ResolvedVersion::Explicit(name)
            | ResolvedVersion::Active(name)
            | ResolvedVersion::Dated(name) => name,
        }
    }

    pub fn into_name(self) -> VersionName {
        match self {
            ResolvedVersion::Explicit(name)
            | ResolvedVersion::Active(name)
            | ResolvedVersion::Dated(name) => name,
        }
    }
}

/// Pick the version a command operates on. Never creates anything.
pub fn resolve_version(
    store: &impl VersionStore,
    requested: Option<VersionName>,
) -> Result<ResolvedVersion, AppError> {
    if let Some(name) = requested {
        return Ok(ResolvedVersion::Explicit(name));
    }
    if let Some(active) = store.active_version()? {
        return Ok(ResolvedVersion::Active(VersionName::new(&active.name)?));
    }
    Ok(ResolvedVersion::Dated(VersionName::dated(Local::now().date_naive())))
}
