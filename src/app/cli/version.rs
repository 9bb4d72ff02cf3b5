use clap::Subcommand;

use crate::app::api;
use crate::domain::{AppConfig, AppError, VersionName};

#[derive(Subcommand)]
pub enum VersionCommands {
    /// List versions, newest first
    #[clap(visible_alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a version and make it the active one
    Create {
        /// Version name, e.g. v4.21.0
        name: String,
    },
    /// Drop a manual edit so the document is compiled from entries again
    Reset {
        /// Version name
        name: String,
    },
}

pub fn run_version(config: &AppConfig, command: VersionCommands) -> Result<(), AppError> {
    match command {
        VersionCommands::List { json } => run_list(config, json),
        VersionCommands::Create { name } => {
            let version = api::create_version(config, &VersionName::new(&name)?)?;
            println!("✅ Version {} is now active", version.name);
            Ok(())
        }
        VersionCommands::Reset { name } => {
            let name = VersionName::new(&name)?;
            api::reset(config, &name)?;
            println!("✅ Version {} is compiled from its entries again", name);
            Ok(())
        }
    }
}

fn run_list(config: &AppConfig, json: bool) -> Result<(), AppError> {
    let versions = api::list_versions(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    if versions.is_empty() {
        println!("No versions yet.");
        return Ok(());
    }

    for version in versions {
        let marker = if version.is_active { "*" } else { " " };
        let created = version
            .created_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {:<20} {:>3} entries  created {}",
            marker, version.name, version.task_count, created
        );
    }
    Ok(())
}
