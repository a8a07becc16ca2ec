//! `package.json` `workspaces` reader (npm, Bun, Yarn).

use super::{ManifestKind, ManifestSource, string_entries};
use crate::error::Result;
use crate::fs::read_json_value;
use serde_json::Value;
use std::path::Path;

/// Reads workspace patterns from `package.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonManifest;

/// The shapes the `workspaces` field can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacesField {
    /// `"workspaces": ["packages/*"]`
    Sequence(Vec<String>),
    /// `"workspaces": { "packages": ["packages/*"], "nohoist": [...] }`
    Object {
        /// The `packages` list, if present and a sequence.
        packages: Option<Vec<String>>,
    },
    /// Missing, or a shape we do not understand.
    Unrecognized,
}

impl WorkspacesField {
    /// Decodes the `workspaces` field out of a parsed `package.json` document.
    #[must_use]
    pub fn from_value(document: &Value) -> Self {
        match document.get("workspaces") {
            Some(Value::Array(items)) => Self::Sequence(strings(items)),
            Some(Value::Object(map)) => Self::Object {
                packages: map
                    .get("packages")
                    .and_then(Value::as_array)
                    .map(|items| strings(items)),
            },
            _ => Self::Unrecognized,
        }
    }

    /// Flattens the field into its pattern list.
    #[must_use]
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            Self::Sequence(patterns)
            | Self::Object {
                packages: Some(patterns),
            } => patterns,
            Self::Object { packages: None } | Self::Unrecognized => Vec::new(),
        }
    }
}

fn strings(items: &[Value]) -> Vec<String> {
    string_entries(ManifestKind::PackageJson, items.iter().map(Value::as_str))
}

impl ManifestSource for PackageJsonManifest {
    fn kind(&self) -> ManifestKind {
        ManifestKind::PackageJson
    }

    fn file_name(&self) -> &'static str {
        "package.json"
    }

    fn read_patterns(&self, root: &Path) -> Result<Vec<String>> {
        let path = root.join(self.file_name());
        let Some(document) = read_json_value(&path)? else {
            return Ok(Vec::new());
        };

        let field = WorkspacesField::from_value(&document);
        if field == WorkspacesField::Unrecognized {
            tracing::debug!("No usable `workspaces` field in {}", path.display());
        }
        Ok(field.into_patterns())
    }
}
