//! # SiteScribe CLI (`scribe`)
//!
//! Edit a folder of HTML documents with plain-language commands.
//!
//! ## Usage
//!
//! ```bash
//! scribe --config ./config/scribe.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scribe run <path> "<command>"` | Index, interpret and apply a command |
//! | `scribe plan <path> "<command>"` | Print the planned actions without applying them |
//! | `scribe index <path>` | Print the site index as JSON |
//! | `scribe apply <plan.json>` | Apply a saved action array |
//!
//! A missing config file is not an error: the planner is disabled and the
//! rule cascade alone interprets commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use sitescribe::config::{self, Config};
use sitescribe::executor::apply_wire;
use sitescribe::indexer::index_site;
use sitescribe::interpreter::interpret;
use sitescribe::pipeline::run_command;
use sitescribe::planner::create_planner;

/// SiteScribe CLI: natural-language edits for HTML sites.
#[derive(Parser)]
#[command(
    name = "scribe",
    about = "SiteScribe: edit HTML documents with natural-language commands",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/scribe.toml`. When the file does not exist the
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/scribe.toml")]
    config: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command against a file or folder and print the outcome.
    ///
    /// Exits with status 1 when the command could not be processed at all
    /// (for example, the path does not exist). Failed individual actions are
    /// reported in the results and do not change the exit status.
    Run {
        /// HTML file or folder to edit.
        path: PathBuf,
        /// The instruction, e.g. "change heading to Welcome".
        command: String,
    },

    /// Print the actions a command would produce, without applying them.
    Plan {
        path: PathBuf,
        command: String,
    },

    /// Print the site index for a file or folder.
    Index { path: PathBuf },

    /// Apply a JSON array of actions from a file.
    Apply {
        /// File holding the action array, as printed by `scribe plan`.
        plan: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,sitescribe=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file, falling back to defaults only when it is absent.
fn resolve_config(path: &Path) -> Result<Config> {
    if path.exists() {
        config::load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = resolve_config(&cli.config)?;

    match cli.command {
        Commands::Run { path, command } => {
            let outcome = run_command(&cfg, &path, &command).await;
            print_json(&outcome)?;
            if outcome.is_failure() {
                std::process::exit(1);
            }
        }
        Commands::Plan { path, command } => {
            let index = index_site(&path, &cfg.indexer)?;
            let planner = create_planner(&cfg.planner);
            let actions = interpret(&index, &command, planner.as_ref()).await;
            print_json(&actions)?;
        }
        Commands::Index { path } => {
            let index = index_site(&path, &cfg.indexer)?;
            print_json(&index)?;
        }
        Commands::Apply { plan } => {
            let content = std::fs::read_to_string(&plan)
                .with_context(|| format!("Failed to read plan file: {}", plan.display()))?;
            let actions: Vec<serde_json::Value> = serde_json::from_str(&content)
                .with_context(|| format!("Plan file is not a JSON array: {}", plan.display()))?;
            let results = apply_wire(actions);
            print_json(&results)?;
        }
    }

    Ok(())
}
