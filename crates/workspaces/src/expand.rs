//! Glob expansion against the directory tree.
//!
//! Each pattern is compiled once and walked from its deepest literal directory
//! (`packages/*` walks `packages/` one level deep). Only directories are
//! returned, relative to the root the walk started from.

use crate::resolver::ResolveOptions;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A compiled workspace glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    matcher: Pattern,
    base: PathBuf,
    max_depth: Option<usize>,
}

impl GlobPattern {
    /// Compiles `pattern`, or returns `None` if it is not a valid glob.
    #[must_use]
    pub fn new(pattern: &str) -> Option<Self> {
        let normalized = normalize(pattern);
        if normalized.starts_with('/') {
            tracing::warn!("Skipping absolute workspace pattern '{}'", pattern);
            return None;
        }

        let segments: Vec<&str> = normalized.split('/').collect();
        let literal_len = segments
            .iter()
            .take_while(|segment| !has_glob_meta(segment))
            .count();
        let (literal, rest) = segments.split_at(literal_len);

        // `.` and `..` are folded out of the literal prefix so every match is
        // spelled the same way and stays under the root.
        let mut base_segments: Vec<&str> = Vec::with_capacity(literal.len());
        for segment in literal {
            match *segment {
                "" | "." => {}
                ".." => {
                    if base_segments.pop().is_none() {
                        tracing::warn!("Skipping workspace pattern outside the root '{}'", pattern);
                        return None;
                    }
                }
                segment => base_segments.push(segment),
            }
        }

        let cleaned = base_segments
            .iter()
            .chain(rest)
            .copied()
            .collect::<Vec<_>>()
            .join("/");
        let matcher = match Pattern::new(&cleaned) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!("Skipping invalid workspace pattern '{}': {}", pattern, e);
                return None;
            }
        };

        let max_depth = if rest.iter().any(|segment| segment.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Some(Self {
            matcher,
            base: base_segments.iter().collect(),
            max_depth,
        })
    }

    /// Literal directory the walk starts from, relative to the root.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// How many levels below [`base`](Self::base) a match can sit, if bounded.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Tests a root-relative path against the pattern.
    #[must_use]
    pub fn matches(&self, relative: &Path) -> bool {
        self.matcher.matches_path_with(relative, MATCH_OPTIONS)
    }

    fn walk_into(&self, root: &Path, options: &ResolveOptions, found: &mut BTreeSet<PathBuf>) {
        let start = if self.base.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.base)
        };
        let mut walker = WalkDir::new(&start).follow_links(options.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !options.is_ignored(e.file_name()));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", start.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            if self.matches(relative) {
                tracing::trace!("Pattern {} matched {}", self.matcher, relative.display());
                found.insert(relative.to_path_buf());
            }
        }
    }
}

/// Expands `patterns` under `root` into matching directories, relative to `root`.
///
/// Invalid patterns are skipped. The root itself is never part of the result.
#[must_use]
pub fn expand_directories<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    options: &ResolveOptions,
) -> BTreeSet<PathBuf> {
    let mut found = BTreeSet::new();

    for pattern in patterns.iter().filter_map(|p| GlobPattern::new(p.as_ref())) {
        pattern.walk_into(root, options, &mut found);
    }

    found
}

fn normalize(pattern: &str) -> String {
    let mut pattern = pattern.trim();
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern.trim_end_matches('/').to_string()
}

fn has_glob_meta(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}
