//! Include/exclude classification of workspace patterns.
//!
//! Exclude patterns are written at whatever granularity the author liked
//! (`packages/excluded/**`, `**/fixtures`), while include expansion yields
//! paths at its own granularity. [`exclusion_variants`] and [`is_excluded`]
//! reconcile the two.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Marks a whole pattern as an exclusion.
pub const NEGATION_MARKER: char = '!';

/// Trailing glob suffixes stripped from exclude patterns, highest priority first.
const STRIPPABLE_SUFFIXES: [&str; 3] = ["/**/*", "/**", "/*"];

/// Patterns split into includes and excludes.
///
/// Excludes have their negation marker removed. Order mirrors the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedPatterns {
    /// Patterns naming directories to treat as workspaces.
    pub includes: Vec<String>,
    /// Patterns naming directories to drop from the includes.
    pub excludes: Vec<String>,
}

impl ClassifiedPatterns {
    /// True when there is nothing to expand.
    #[must_use]
    pub fn has_includes(&self) -> bool {
        !self.includes.is_empty()
    }
}

/// Splits raw manifest patterns into includes and excludes.
#[must_use]
pub fn classify(patterns: &[String]) -> ClassifiedPatterns {
    let mut classified = ClassifiedPatterns::default();

    for pattern in patterns {
        let pattern = pattern.trim();
        if let Some(stripped) = pattern.strip_prefix(NEGATION_MARKER) {
            if !stripped.is_empty() {
                classified.excludes.push(stripped.to_string());
            }
        } else if !pattern.is_empty() {
            classified.includes.push(pattern.to_string());
        }
    }

    classified
}

/// Returns the pattern itself plus the form with its trailing glob removed.
///
/// `packages/excluded/**` yields `packages/excluded/**` and `packages/excluded`,
/// so the excluded directory itself is matched as well as its contents.
#[must_use]
pub fn exclusion_variants(pattern: &str) -> Vec<String> {
    let mut variants = vec![pattern.to_string()];

    let stripped = STRIPPABLE_SUFFIXES
        .iter()
        .find_map(|suffix| pattern.strip_suffix(suffix));
    if let Some(stripped) = stripped.filter(|s| !s.is_empty()) {
        variants.push(stripped.to_string());
    }

    variants
}

/// Checks `candidate` against the expanded exclusion set.
///
/// A candidate is excluded when it equals an exclusion or lies beneath one.
/// The comparison is per path component, so `packages/excluded-extra` is not
/// beneath `packages/excluded`.
#[must_use]
pub fn is_excluded(candidate: &Path, exclusions: &BTreeSet<PathBuf>) -> bool {
    candidate
        .ancestors()
        .any(|ancestor| !ancestor.as_os_str().is_empty() && exclusions.contains(ancestor))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_classify() {
        let classified = classify(&strings(&[
            "packages/*",
            "!packages/excluded/**",
            "apps/*",
            "!**/fixtures",
        ]));

        assert_eq!(classified.includes, strings(&["packages/*", "apps/*"]));
        assert_eq!(
            classified.excludes,
            strings(&["packages/excluded/**", "**/fixtures"])
        );
    }

    #[test]
    fn test_classify_only_negations() {
        let classified = classify(&strings(&["!packages/a", "!apps/*"]));
        assert!(!classified.has_includes());
        assert_eq!(classified.excludes.len(), 2);
    }

    #[test]
    fn test_classify_skips_blank_and_bare_marker() {
        let classified = classify(&strings(&["", "  ", "!", " packages/* "]));
        assert_eq!(classified.includes, strings(&["packages/*"]));
        assert!(classified.excludes.is_empty());
    }

    #[test]
    fn test_exclusion_variants() {
        assert_eq!(
            exclusion_variants("packages/excluded/**/*"),
            strings(&["packages/excluded/**/*", "packages/excluded"])
        );
        assert_eq!(
            exclusion_variants("packages/excluded/**"),
            strings(&["packages/excluded/**", "packages/excluded"])
        );
        assert_eq!(
            exclusion_variants("packages/excluded/*"),
            strings(&["packages/excluded/*", "packages/excluded"])
        );
        assert_eq!(exclusion_variants("**/fixtures"), strings(&["**/fixtures"]));
    }

    #[test]
    fn test_exclusion_variants_never_empty_pattern() {
        assert_eq!(exclusion_variants("/**"), strings(&["/**"]));
    }

    #[test]
    fn test_is_excluded_exact_and_nested() {
        let exclusions: BTreeSet<PathBuf> = [PathBuf::from("packages/excluded")].into();

        assert!(is_excluded(Path::new("packages/excluded"), &exclusions));
        assert!(is_excluded(Path::new("packages/excluded/pkg-b"), &exclusions));
        assert!(!is_excluded(Path::new("packages/excluded-extra"), &exclusions));
        assert!(!is_excluded(Path::new("packages"), &exclusions));
    }

    proptest! {
        #[test]
        fn prop_classify_partitions_input(
            patterns in proptest::collection::vec("!?[a-z]{1,6}(/[a-z*]{1,4}){0,3}", 0..12)
        ) {
            let classified = classify(&patterns);
            prop_assert_eq!(
                classified.includes.len() + classified.excludes.len(),
                patterns.len()
            );
            prop_assert!(classified.excludes.iter().all(|p| !p.starts_with(NEGATION_MARKER)));
        }

        #[test]
        fn prop_sibling_with_shared_prefix_not_excluded(
            base in "[a-z]{1,8}",
            name in "[a-z]{1,8}",
            suffix in "[-_a-z0-9]{1,6}",
        ) {
            let excluded = PathBuf::from(&base).join(&name);
            let exclusions: BTreeSet<PathBuf> = [excluded.clone()].into();
            let sibling = PathBuf::from(&base).join(format!("{name}{suffix}"));

            prop_assert!(is_excluded(&excluded, &exclusions));
            prop_assert!(is_excluded(&excluded.join("nested"), &exclusions));
            prop_assert!(!is_excluded(&sibling, &exclusions));
        }
    }
}
