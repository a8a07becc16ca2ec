//! `pkgdirs`: print the workspace directories of a monorepo, one per line.

mod cli;
mod logging;

use clap::Parser;
use miette::IntoDiagnostic;
use pkgdirs_workspaces::resolve_workspace_dirs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::logging::{TracingFormat, init_tracing};

fn main() -> miette::Result<()> {
    init_tracing(TracingFormat::from_env())?;

    let cli = Cli::parse();
    let dirs = run(cli)?;

    let mut stdout = io::stdout().lock();
    for dir in dirs {
        writeln!(stdout, "{}", dir.display()).into_diagnostic()?;
    }
    stdout.flush().into_diagnostic()
}

#[tracing::instrument(name = "pkgdirs")]
fn run(cli: Cli) -> miette::Result<Vec<PathBuf>> {
    let dirs = resolve_workspace_dirs(cli.root.as_deref())?;
    tracing::info!(count = dirs.len(), "Resolved workspace directories");
    Ok(dirs)
}
