//! CLI Adapter.

mod form;
mod version;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Editor, Error as DialoguerError};

use crate::app::api;
use crate::app::config::load_config;
use crate::app::logging::init_logging;
use crate::domain::{AppConfig, AppError, Category, VersionName};

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(version)]
#[command(
    about = "Generate release-note entries with an LLM and compile them per version",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./relnotes.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file (overrides storage.database)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
struct ReleaseArg {
    /// Release version name (defaults to the active version)
    #[arg(short = 'r', long = "release", value_name = "VERSION")]
    release: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a release-note entry and add it to a version
    #[clap(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        release: ReleaseArg,
        /// Category: "User Story", Bug, Improvement, "Technical Debt"
        #[arg(short, long)]
        category: Option<String>,
        /// Ticket identifier, e.g. JBSV-3048
        #[arg(short, long)]
        id: Option<String>,
        /// Ticket title
        #[arg(short, long)]
        title: Option<String>,
        /// Ticket description
        #[arg(short, long, conflicts_with = "description_file")]
        description: Option<String>,
        /// Read the ticket description from a file
        #[arg(long, value_name = "PATH")]
        description_file: Option<PathBuf>,
        /// Evidence image file name referenced from the entry
        #[arg(long)]
        image: Option<String>,
        /// Print the generated entry without saving it
        #[arg(long)]
        preview: bool,
    },
    /// Print the compiled document of a version
    #[clap(visible_alias = "s")]
    Show {
        #[command(flatten)]
        release: ReleaseArg,
    },
    /// Show per-category task counts of a version
    Stats {
        #[command(flatten)]
        release: ReleaseArg,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace a version's document with manually edited text
    #[clap(visible_alias = "e")]
    Edit {
        #[command(flatten)]
        release: ReleaseArg,
        /// Read the new document from a file ("-" for stdin) instead of opening an editor
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the compiled document to a Markdown file
    #[clap(visible_alias = "x")]
    Export {
        #[command(flatten)]
        release: ReleaseArg,
        /// Output path (defaults to release_notes_<version>.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a version and all of its entries
    #[clap(visible_alias = "rm")]
    Delete {
        /// Version to delete
        version: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage release versions
    #[clap(visible_alias = "v")]
    Version {
        #[command(subcommand)]
        command: version::VersionCommands,
    },
    /// Delete every version and entry
    Purge {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result = load_cli_config(cli.config.as_deref(), cli.db).and_then(|config| {
        match cli.command {
            Commands::Generate {
                release,
                category,
                id,
                title,
                description,
                description_file,
                image,
                preview,
            } => {
                let fields = form::FormFields {
                    category,
                    id,
                    title,
                    description,
                    description_file,
                    image,
                };
                run_generate(&config, release, fields, preview)
            }
            Commands::Show { release } => run_show(&config, release),
            Commands::Stats { release, json } => run_stats(&config, release, json),
            Commands::Edit { release, file, yes } => run_edit(&config, release, file, yes),
            Commands::Export { release, output } => run_export(&config, release, output),
            Commands::Delete { version, yes } => run_delete(&config, &version, yes),
            Commands::Version { command } => version::run_version(&config, command),
            Commands::Purge { yes } => run_purge(&config, yes),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_cli_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = load_config(path, &std::env::current_dir()?)?;
    if let Some(db) = db {
        config.storage.database = db;
    }
    Ok(config)
}

fn parse_release(release: &ReleaseArg) -> Result<Option<VersionName>, AppError> {
    release.release.as_deref().map(VersionName::new).transpose()
}

fn run_generate(
    config: &AppConfig,
    release: ReleaseArg,
    fields: form::FormFields,
    preview: bool,
) -> Result<(), AppError> {
    let version = parse_release(&release)?;
    let Some(entry) = form::complete_entry(fields)? else {
        println!("Cancelled.");
        return Ok(());
    };

    let outcome = api::generate(
        config,
        api::GenerateRequest { version, entry: entry.clone(), save: !preview },
    )?;

    println!("{}", outcome.body);
    if preview {
        println!();
        println!("👀 Preview only; nothing saved to {}", outcome.version);
    } else {
        println!();
        println!("✅ Saved [{}] to version {}", entry.ticket_id, outcome.version);
    }
    Ok(())
}

fn run_show(config: &AppConfig, release: ReleaseArg) -> Result<(), AppError> {
    let view = api::show(config, parse_release(&release)?)?;
    println!("{}", view.markdown.trim_end());
    Ok(())
}

fn run_stats(config: &AppConfig, release: ReleaseArg, json: bool) -> Result<(), AppError> {
    let (version, stats) = api::stats(config, parse_release(&release)?)?;

    if json {
        let value = serde_json::json!({ "version": version.as_str(), "stats": stats });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Version {}", version);
    for category in Category::ALL {
        println!("  {:<15} {}", category.label(), stats.count(category));
    }
    println!("  {:<15} {}", "Total", stats.total);
    if stats.overridden {
        println!("  (document replaced by a manual edit)");
    }
    Ok(())
}

fn run_edit(
    config: &AppConfig,
    release: ReleaseArg,
    file: Option<PathBuf>,
    yes: bool,
) -> Result<(), AppError> {
    let view = api::editable(config, parse_release(&release)?)?;
    let version = view.version;

    let text = match file {
        Some(path) if path.as_os_str() == "-" => std::io::read_to_string(std::io::stdin())?,
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let edited =
                Editor::new().extension(".md").edit(&view.markdown).map_err(prompt_error)?;
            match edited {
                Some(text) => text,
                None => {
                    println!("No changes saved.");
                    return Ok(());
                }
            }
        }
    };

    if !yes
        && !confirm(&format!(
            "Replace every entry of {} with the edited document?",
            version
        ))?
    {
        println!("Cancelled.");
        return Ok(());
    }

    api::edit(config, &version, &text)?;
    println!("✅ Saved manual edit for version {}", version);
    Ok(())
}

fn run_export(
    config: &AppConfig,
    release: ReleaseArg,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let path = api::export(config, parse_release(&release)?, output.as_deref())?;
    println!("✅ Exported {}", path.display());
    Ok(())
}

fn run_delete(config: &AppConfig, version: &str, yes: bool) -> Result<(), AppError> {
    let version = VersionName::new(version)?;
    if !yes && !confirm(&format!("Delete version {} and all of its entries?", version))? {
        println!("Cancelled.");
        return Ok(());
    }
    api::delete(config, &version)?;
    println!("✅ Deleted version {}", version);
    Ok(())
}

fn run_purge(config: &AppConfig, yes: bool) -> Result<(), AppError> {
    if !yes && !confirm("Delete every version and entry?")? {
        println!("Cancelled.");
        return Ok(());
    }
    api::purge(config)?;
    println!("✅ Removed all versions");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

/// Terminal failures from interactive prompts surface as I/O errors.
fn prompt_error(err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(err) => AppError::Io(err),
    }
}
