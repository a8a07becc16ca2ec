//! Error types for workspace resolution.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for workspace resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving workspace directories.
///
/// A missing manifest is never an error; only manifests that exist but cannot
/// be read or decoded end up here.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error during {operation}{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(pkgdirs::workspaces::io_error),
        help("Check that the referenced paths exist and that you have permission to read them")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Optional path where the error occurred.
        path: Option<PathBuf>,
        /// Description of the operation being performed.
        operation: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(pkgdirs::workspaces::json_error),
        help("Ensure package.json is valid JSON")
    )]
    Json {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Optional path to the file being parsed.
        path: Option<PathBuf>,
    },

    /// YAML parsing error.
    #[cfg(feature = "manifest-pnpm")]
    #[error("YAML parsing error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(pkgdirs::workspaces::yaml_error),
        help("Ensure pnpm-workspace.yaml is valid YAML")
    )]
    Yaml {
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
        /// Optional path to the file being parsed.
        path: Option<PathBuf>,
    },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "file operation".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source, path: None }
    }
}

#[cfg(feature = "manifest-pnpm")]
impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml { source, path: None }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_io_error_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::Io {
            source: io_error,
            path: Some(PathBuf::from("/repo/package.json")),
            operation: "reading manifest".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("I/O error during reading manifest"));
        assert!(message.contains("/repo/package.json"));
    }

    #[test]
    fn test_io_error_no_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let error = Error::Io {
            source: io_error,
            path: None,
            operation: "resolving current directory".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("resolving current directory"));
        assert!(!message.contains(" at "));
    }

    #[test]
    fn test_json_error_display() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let error = Error::Json {
            source: json_error,
            path: Some(PathBuf::from("/repo/package.json")),
        };

        let message = error.to_string();
        assert!(message.contains("JSON parsing error"));
        assert!(message.contains("package.json"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let error: Error = io_error.into();

        match error {
            Error::Io {
                path, operation, ..
            } => {
                assert_eq!(path, None);
                assert_eq!(operation, "file operation");
            }
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let error: Error = json_error.into();

        assert!(matches!(error, Error::Json { path: None, .. }));
    }

    #[cfg(feature = "manifest-pnpm")]
    #[test]
    fn test_yaml_error_diagnostics() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error = Error::Yaml {
            source: yaml_error,
            path: Some(PathBuf::from("/repo/pnpm-workspace.yaml")),
        };

        assert!(error.to_string().contains("pnpm-workspace.yaml"));
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("pkgdirs::workspaces::yaml_error".to_string())
        );
        assert!(error.help().is_some());
    }

    #[test]
    fn test_diagnostic_codes() {
        let error = Error::Io {
            source: std::io::Error::new(std::io::ErrorKind::Other, "x"),
            path: None,
            operation: "test".to_string(),
        };
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("pkgdirs::workspaces::io_error".to_string())
        );

        let error: Error = serde_json::from_str::<serde_json::Value>("[")
            .unwrap_err()
            .into();
        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }
}
