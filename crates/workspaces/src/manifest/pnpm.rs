//! `pnpm-workspace.yaml` reader.

use super::{ManifestKind, ManifestSource, string_entries};
use crate::error::Result;
use crate::fs::read_yaml_value;
use serde_yaml::Value;
use std::path::Path;

/// Reads workspace patterns from `pnpm-workspace.yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnpmWorkspaceManifest;

impl ManifestSource for PnpmWorkspaceManifest {
    fn kind(&self) -> ManifestKind {
        ManifestKind::Pnpm
    }

    fn file_name(&self) -> &'static str {
        "pnpm-workspace.yaml"
    }

    fn read_patterns(&self, root: &Path) -> Result<Vec<String>> {
        let path = root.join(self.file_name());
        let Some(document) = read_yaml_value(&path)? else {
            return Ok(Vec::new());
        };

        match document.get("packages") {
            Some(Value::Sequence(items)) => Ok(string_entries(
                ManifestKind::Pnpm,
                items.iter().map(Value::as_str),
            )),
            _ => {
                tracing::debug!("No `packages` sequence in {}", path.display());
                Ok(Vec::new())
            }
        }
    }
}
