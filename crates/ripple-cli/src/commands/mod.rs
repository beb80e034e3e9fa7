//! Command dispatch and handler modules.

mod graph;
mod order;
mod outdated;
mod package;
mod verify;

use std::path::PathBuf;

use miette::Result;
use tokio_util::sync::CancellationToken;

use ripple_core::manifest::MANIFEST_FILE;
use ripple_util::errors::RippleError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Command::Order { json } => order::exec(json),
        Command::Graph { solution } => graph::exec(solution),
        Command::Package { name } => package::exec(&name),
        Command::Outdated { solution } => outdated::exec(solution, cancel).await,
        Command::Verify { solution } => verify::exec(solution, cancel).await,
    }
}

/// The nearest directory, from the current one upwards, holding `ripple.toml`.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(RippleError::Io)?;
    Ok(ripple_util::fs::find_project_root(&cwd, MANIFEST_FILE)?)
}
