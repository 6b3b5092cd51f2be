//! The index → interpret → execute pipeline for a single command.
//!
//! ```text
//! path ──▶ index_site ──▶ SiteIndex ──▶ interpret ──▶ [Action] ──▶ apply_actions ──▶ [ActionResult]
//!                                          │
//!                                  Planner, then cascade
//! ```
//!
//! Indexing failures are fatal and become the error outcome. Per-action
//! failures are reported inside the results; they never abort the run.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::executor::apply_actions;
use crate::indexer::index_site;
use crate::interpreter::interpret;
use crate::models::{ActionResult, CommandOutcome};
use crate::planner::{create_planner, Planner};

/// Run one command against `path` with an explicit planner.
pub async fn process(
    config: &Config,
    planner: &dyn Planner,
    path: &Path,
    command: &str,
) -> CommandOutcome {
    match run(config, planner, path, command).await {
        Ok(results) => {
            let failed = results.iter().filter(|r| r.is_error()).count();
            tracing::info!(
                actions = results.len(),
                failed,
                "command processed"
            );
            CommandOutcome::completed(results)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %format!("{:#}", e), "command failed");
            CommandOutcome::failed(format!("{:#}", e))
        }
    }
}

/// Run one command using the planner configured in `config`.
pub async fn run_command(config: &Config, path: &Path, command: &str) -> CommandOutcome {
    let planner = create_planner(&config.planner);
    process(config, planner.as_ref(), path, command).await
}

async fn run(
    config: &Config,
    planner: &dyn Planner,
    path: &Path,
    command: &str,
) -> Result<Vec<ActionResult>> {
    let index = index_site(path, &config.indexer)?;
    let actions = interpret(&index, command, planner).await;
    Ok(apply_actions(&actions))
}
