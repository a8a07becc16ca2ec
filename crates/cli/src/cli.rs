//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// List the package directories of a JavaScript monorepo.
///
/// Reads `pnpm-workspace.yaml` and the `workspaces` field of `package.json`,
/// expands their globs, and prints one absolute directory per line. The root
/// is always printed first.
#[derive(Parser, Debug)]
#[command(name = "pkgdirs", version)]
pub struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(env = "PKGDIRS_ROOT")]
    pub root: Option<PathBuf>,
}
