//! Read-only filesystem primitives used by the resolver.
//!
//! A missing file is a normal state for a repository that does not use a given
//! manifest format, so the readers here return `Ok(None)` for it instead of an
//! error. Anything else that goes wrong while reading is surfaced.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A path that was confirmed to be a directory at stat time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInfo {
    /// The directory path, as passed to [`stat_dir`].
    pub path: PathBuf,
}

/// Reads a manifest file as UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::Io`] for every read failure except "not found".
pub fn read_manifest(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::trace!("No manifest at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::Io {
            source: e,
            path: Some(path.to_path_buf()),
            operation: "reading manifest".to_string(),
        }),
    }
}

/// Stats `path`, following symlinks.
///
/// Returns `None` when the path is missing, unreadable, or not a directory.
#[must_use]
pub fn stat_dir(path: &Path) -> Option<DirectoryInfo> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Some(DirectoryInfo {
            path: path.to_path_buf(),
        }),
        Ok(_) => {
            tracing::trace!("Not a directory: {}", path.display());
            None
        }
        Err(e) => {
            tracing::trace!("Cannot stat {}: {}", path.display(), e);
            None
        }
    }
}

/// Removes `.` segments, folds `..` into its parent, and drops trailing
/// separators, without touching the filesystem.
///
/// A `..` directly under the filesystem root stays at the root. A leading `..`
/// in a relative path is kept.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    components.push(component);
                }
            },
            component => components.push(component),
        }
    }

    components.iter().collect()
}

/// Reads and decodes a JSON file into a generic value.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid JSON.
pub fn read_json_value(path: &Path) -> Result<Option<serde_json::Value>> {
    let Some(content) = read_manifest(path)? else {
        return Ok(None);
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| Error::Json {
            source: e,
            path: Some(path.to_path_buf()),
        })
}

/// Reads and decodes a YAML file into a generic value.
///
/// An empty document yields `Ok(None)`, same as a missing file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid YAML.
#[cfg(feature = "manifest-pnpm")]
pub fn read_yaml_value(path: &Path) -> Result<Option<serde_yaml::Value>> {
    let Some(content) = read_manifest(path)? else {
        return Ok(None);
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::Yaml {
            source: e,
            path: Some(path.to_path_buf()),
        })
}
