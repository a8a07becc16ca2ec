//! Workspace directory resolution.
//!
//! This module provides the [`WorkspaceResolver`], which turns the patterns
//! declared by a repository's manifests into the set of package directories.
//! The pipeline is linear: read manifests, classify patterns, expand the
//! exclusions, expand the inclusions, drop excluded and non-directory matches,
//! and add the root.

use crate::error::{Error, Result};
use crate::expand::expand_directories;
use crate::fs::{clean_path, stat_dir};
use crate::manifest::collect_patterns;
use crate::patterns::{classify, exclusion_variants, is_excluded};
use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directory names never descended into while expanding globs.
pub const DEFAULT_IGNORED_DIRS: [&str; 2] = ["node_modules", ".git"];

/// Knobs for glob expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Directory names pruned from every walk.
    pub ignored_dirs: Vec<String>,
    /// Whether to follow symlinked directories.
    pub follow_links: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(ToString::to_string).collect(),
            follow_links: true,
        }
    }
}

impl ResolveOptions {
    /// Replaces the pruned directory names.
    #[must_use]
    pub fn with_ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether symlinked directories are followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub(crate) fn is_ignored(&self, name: &OsStr) -> bool {
        self.ignored_dirs
            .iter()
            .any(|ignored| name == OsStr::new(ignored))
    }
}

/// The resolved set of workspace directories.
///
/// Always contains the root. Iteration order is unspecified; use
/// [`into_sorted_vec`](Self::into_sorted_vec) when order matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceDirs {
    root: PathBuf,
    dirs: HashSet<PathBuf>,
}

impl WorkspaceDirs {
    fn new(root: PathBuf) -> Self {
        let dirs = HashSet::from([root.clone()]);
        Self { root, dirs }
    }

    fn insert(&mut self, dir: PathBuf) {
        self.dirs.insert(dir);
    }

    /// The root the directories were resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if `dir` is one of the resolved directories.
    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    /// Number of directories, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Never true: the root is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Iterates over the directories in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    /// Consumes the set and returns the directories sorted.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self.dirs.into_iter().collect();
        dirs.sort();
        dirs
    }
}

impl IntoIterator for WorkspaceDirs {
    type Item = PathBuf;
    type IntoIter = std::collections::hash_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.into_iter()
    }
}

/// Resolves the workspace directories of a single repository root.
///
/// Nothing is cached: every call re-reads the manifests and re-walks the tree.
#[derive(Debug, Clone)]
pub struct WorkspaceResolver {
    root: PathBuf,
    options: ResolveOptions,
}

impl WorkspaceResolver {
    /// Creates a resolver for `root` with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: ResolveOptions::default(),
        }
    }

    /// Replaces the expansion options.
    #[must_use]
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// The root directories are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the manifests under the root and resolves their patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a manifest exists but cannot be read or decoded.
    pub fn resolve(&self) -> Result<WorkspaceDirs> {
        tracing::debug!("Resolving workspace directories in: {}", self.root.display());
        let patterns = collect_patterns(&self.root)?;
        Ok(self.resolve_patterns(&patterns))
    }

    /// Resolves an already collected list of raw patterns.
    #[must_use]
    pub fn resolve_patterns(&self, patterns: &[String]) -> WorkspaceDirs {
        let mut dirs = WorkspaceDirs::new(self.root.clone());

        let classified = classify(patterns);
        if !classified.has_includes() {
            tracing::debug!("No include patterns, workspace is just the root");
            return dirs;
        }

        let exclusions = self.excluded_paths(&classified.excludes);
        tracing::debug!("Expanded exclusions to {} path(s)", exclusions.len());

        for relative in expand_directories(&self.root, &classified.includes, &self.options) {
            if is_excluded(&relative, &exclusions) {
                tracing::trace!("Excluded {}", relative.display());
                continue;
            }

            match stat_dir(&self.root.join(&relative)) {
                Some(info) => {
                    dirs.insert(info.path);
                }
                None => tracing::trace!("Dropped non-directory match {}", relative.display()),
            }
        }

        tracing::debug!("Resolved {} workspace director(ies)", dirs.len());
        dirs
    }

    fn excluded_paths(&self, excludes: &[String]) -> BTreeSet<PathBuf> {
        excludes
            .iter()
            .flat_map(|pattern| exclusion_variants(pattern))
            .flat_map(|variant| expand_directories(&self.root, &[variant], &self.options))
            .collect()
    }
}

/// Resolves the workspace directories declared under `root`.
///
/// With no root, the current working directory is used. A relative root is
/// made absolute against the current working directory, then `.` and `..`
/// segments are folded lexically (symlinks are not resolved). The result is
/// sorted, free of duplicates, and always starts with the root.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined or a
/// manifest exists but cannot be read or decoded.
pub fn resolve_workspace_dirs(root: Option<&Path>) -> Result<Vec<PathBuf>> {
    let root = match root {
        Some(root) => std::path::absolute(root).map_err(|e| Error::Io {
            source: e,
            path: Some(root.to_path_buf()),
            operation: "making root path absolute".to_string(),
        })?,
        None => std::env::current_dir().map_err(|e| Error::Io {
            source: e,
            path: None,
            operation: "resolving current directory".to_string(),
        })?,
    };
    let root = clean_path(&root);

    Ok(WorkspaceResolver::new(root).resolve()?.into_sorted_vec())
}
