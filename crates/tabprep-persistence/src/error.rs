//! Persistence error types.
//!
//! All persistence operations return structured errors; [`PersistenceError::suggestion`]
//! gives a remediation hint where one exists.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid file format (not a .tpp file).
    #[error("invalid preprocessor artifact {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Unsupported schema version.
    #[error("artifact version {found} is not supported (maximum: {max_supported}): {path}")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Only fitted preprocessors can be saved.
    #[error("cannot save a preprocessor that has not been fitted")]
    NotFitted,

    /// Serialization error.
    #[error("failed to serialize preprocessor artifact")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("failed to deserialize preprocessor artifact {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to move {temp_path} into place at {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.")
                } else {
                    Some("Check that you have permission to write to this location.")
                }
            }
            Self::InvalidFormat { .. } => Some("Make sure the path points to a .tpp artifact."),
            Self::UnsupportedVersion { .. } => {
                Some("The artifact was written by a newer tabprep; upgrade to load it.")
            }
            Self::NotFitted => Some("Fit the preprocessor on training data before saving it."),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("The artifact may be corrupted; rerun the pipeline to regenerate it.")
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or write the artifact to a different location.")
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
