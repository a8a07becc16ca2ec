//! Manifest readers that extract workspace glob patterns.
//!
//! Two formats are understood:
//! - `pnpm-workspace.yaml` (pnpm), behind the `manifest-pnpm` feature
//! - `package.json` (npm, Bun, Yarn)
//!
//! Every reader treats a missing file as "no patterns". A manifest that exists
//! but cannot be read or decoded is an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pkgdirs_workspaces::manifest::{collect_patterns, ManifestSource, PackageJsonManifest};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let from_package_json = PackageJsonManifest.read_patterns(root)?;
//! let all = collect_patterns(root)?;
//! ```

use crate::error::Result;
use std::fmt;
use std::path::Path;

pub mod package_json;

#[cfg(feature = "manifest-pnpm")]
pub mod pnpm;

pub use package_json::{PackageJsonManifest, WorkspacesField};

#[cfg(feature = "manifest-pnpm")]
pub use pnpm::PnpmWorkspaceManifest;

/// The manifest formats a pattern list can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// `pnpm-workspace.yaml`
    Pnpm,
    /// `package.json` `workspaces` field
    PackageJson,
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pnpm => write!(f, "pnpm-workspace.yaml"),
            Self::PackageJson => write!(f, "package.json"),
        }
    }
}

/// A workspace manifest format that can be read from a repository root.
pub trait ManifestSource {
    /// Which format this source reads.
    fn kind(&self) -> ManifestKind;

    /// File name of the manifest, relative to the root.
    fn file_name(&self) -> &'static str;

    /// Reads the raw pattern list declared by the manifest under `root`.
    ///
    /// Returns an empty list when the manifest is absent or declares nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or decoded.
    fn read_patterns(&self, root: &Path) -> Result<Vec<String>>;
}

/// Reads every enabled manifest under `root` and concatenates their patterns.
///
/// pnpm patterns come first, then `package.json` patterns. Order carries no
/// meaning downstream.
///
/// # Errors
///
/// Returns the first error raised by a reader.
pub fn collect_patterns(root: &Path) -> Result<Vec<String>> {
    let mut patterns = Vec::new();

    for source in sources() {
        let found = source.read_patterns(root)?;
        tracing::debug!("Read {} pattern(s) from {}", found.len(), source.kind());
        patterns.extend(found);
    }

    Ok(patterns)
}

fn sources() -> Vec<Box<dyn ManifestSource>> {
    let mut sources: Vec<Box<dyn ManifestSource>> = Vec::with_capacity(2);
    #[cfg(feature = "manifest-pnpm")]
    sources.push(Box::new(PnpmWorkspaceManifest));
    sources.push(Box::new(PackageJsonManifest));
    sources
}

/// Keeps string entries of a decoded sequence, dropping blanks and logging
/// anything that is not a string.
pub(crate) fn string_entries<'a, I>(kind: ManifestKind, entries: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            if entry.is_none() {
                tracing::warn!("Ignoring non-string workspace pattern in {}", kind);
            }
            entry
        })
        .filter(|pattern| !pattern.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_patterns_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_patterns(temp_dir.path()).unwrap().is_empty());
    }

    #[cfg(feature = "manifest-pnpm")]
    #[test]
    fn test_collect_patterns_both_sources() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("pnpm-workspace.yaml"), "packages:\n  - packages/*\n").unwrap();
        fs::write(root.join("package.json"), r#"{"workspaces": ["apps/*"]}"#).unwrap();

        let patterns = collect_patterns(root).unwrap();
        assert_eq!(patterns, vec!["packages/*", "apps/*"]);
    }

    #[test]
    fn test_collect_patterns_propagates_errors() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{ broken").unwrap();

        assert!(collect_patterns(temp_dir.path()).is_err());
    }

    #[test]
    fn test_string_entries_skips_non_strings_and_blanks() {
        let entries = vec![Some("packages/*"), None, Some("  "), Some("apps/*")];
        assert_eq!(
            string_entries(ManifestKind::PackageJson, entries),
            vec!["packages/*", "apps/*"]
        );
    }

    #[test]
    fn test_manifest_kind_display() {
        assert_eq!(ManifestKind::Pnpm.to_string(), "pnpm-workspace.yaml");
        assert_eq!(ManifestKind::PackageJson.to_string(), "package.json");
    }
}
