//! Error types for bproc-toolchain.

use std::path::PathBuf;
use thiserror::Error;

/// Request payload rejected before any side effect took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `program` was absent or empty.
    #[error("program is required")]
    MissingProgram,

    /// compile request without a `type`.
    #[error("type is required")]
    MissingFormat,

    /// `type` outside the supported output formats.
    #[error("{0} type is not allowed")]
    UnsupportedFormat(String),
}

/// Scratch storage failures. These never abort the server.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Creating the workspace root or a run directory failed.
    #[error("failed to create workspace directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the artifact failed.
    #[error("failed to write artifact {}: {source}", path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a finished run directory failed.
    #[error("failed to remove workspace directory {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type alias for workspace operations
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_names_value() {
        let err = ValidationError::UnsupportedFormat("xyz".to_string());
        assert_eq!(err.to_string(), "xyz type is not allowed");
    }

    #[test]
    fn test_workspace_error_mentions_path() {
        let err = WorkspaceError::WriteArtifact {
            path: PathBuf::from("/tmp/run/program.bpasm"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/run/program.bpasm"));
        assert!(text.contains("denied"));
    }
}
