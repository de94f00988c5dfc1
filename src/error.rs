//! Error types for fs-batch.
//!
//! All operations return `Result<T>` which aliases `Result<T, BatchError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from building, validating and committing a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A required construction parameter was empty.
    #[error("{action}: {parameter} must not be empty")]
    InvalidArgument {
        action: &'static str,
        parameter: &'static str,
    },

    /// Something that was supposed to be an action is not one.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A read-only check failed during validation.
    #[error("{reason}: {}", .path.display())]
    PreconditionFailed {
        path: PathBuf,
        reason: String,
        kind: PreconditionKind,
    },

    /// The filesystem or a subprocess failed during commit.
    #[error("Failed to {operation}: {source}")]
    OperationFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// User declined confirmation.
    ///
    /// Not a failure; used for control flow when the user cancels.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Reading or writing a plan file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Plan document is not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What a failed precondition found at its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionKind {
    /// A directory was required and nothing is there.
    MissingDirectory,
    /// Any other failure: a missing file, the wrong file type, permissions.
    Unmet,
}

impl BatchError {
    pub(crate) fn precondition(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BatchError::PreconditionFailed {
            path: path.into(),
            reason: reason.into(),
            kind: PreconditionKind::Unmet,
        }
    }

    pub(crate) fn missing_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BatchError::PreconditionFailed {
            path: path.into(),
            reason: reason.into(),
            kind: PreconditionKind::MissingDirectory,
        }
    }

    pub(crate) fn operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        BatchError::OperationFailed {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type alias for fs-batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
