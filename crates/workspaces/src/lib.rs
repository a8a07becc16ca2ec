//! Workspace directory resolution for JavaScript monorepos.
//!
//! Given a repository root, this crate reads the workspace globs declared in
//! `pnpm-workspace.yaml` and `package.json`, expands them against the
//! filesystem, and returns the set of package directories. The root is always
//! part of the result.
//!
//! # Pipeline
//!
//! 1. [`manifest`] readers collect raw patterns from every manifest present.
//! 2. [`patterns`] splits them into includes and `!`-prefixed excludes.
//! 3. Exclude patterns, plus their trailing-glob-stripped variants, are
//!    expanded into a set of excluded paths.
//! 4. Include patterns are expanded; matches equal to or nested under an
//!    excluded path are dropped, and survivors must still stat as directories.
//!
//! # Feature flags
//!
//! - `manifest-pnpm` - Reads `pnpm-workspace.yaml` (**enabled by default**)
//!
//! `package.json` support is always available.
//!
//! # Edge cases
//!
//! - **Missing manifests**: not an error, they contribute no patterns.
//! - **Malformed manifests**: reported as [`Error::Json`] or `Error::Yaml`.
//! - **Only negated patterns**: nothing is expanded, the result is the root.
//! - **Matches that are files**: silently dropped.
//!
//! # Example
//!
//! ```rust,no_run
//! use pkgdirs_workspaces::resolve_workspace_dirs;
//! use std::path::Path;
//!
//! let dirs = resolve_workspace_dirs(Some(Path::new("/path/to/monorepo")))?;
//! for dir in &dirs {
//!     println!("{}", dir.display());
//! }
//! # Ok::<(), pkgdirs_workspaces::Error>(())
//! ```
//!
//! Callers that need control over the walk use [`WorkspaceResolver`]:
//!
//! ```rust,ignore
//! use pkgdirs_workspaces::{ResolveOptions, WorkspaceResolver};
//!
//! let options = ResolveOptions::default().with_ignored_dirs(["node_modules", ".git", "vendor"]);
//! let dirs = WorkspaceResolver::new(root).with_options(options).resolve()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod expand;
pub mod fs;
pub mod manifest;
pub mod patterns;
pub mod resolver;

// Re-export error types
pub use error::{Error, Result};

// Re-export resolver types
pub use resolver::{ResolveOptions, WorkspaceDirs, WorkspaceResolver, resolve_workspace_dirs};

// Re-export manifest readers
pub use manifest::{
    ManifestKind, ManifestSource, PackageJsonManifest, WorkspacesField, collect_patterns,
};

#[cfg(feature = "manifest-pnpm")]
pub use manifest::PnpmWorkspaceManifest;
