//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or validating pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    // === Schema Definition Errors ===
    /// A column is declared both numeric and categorical.
    #[error("column '{column}' is declared as both numeric and categorical")]
    OverlappingColumn { column: String },

    /// The target column is also declared as a feature.
    #[error("target column '{column}' must not be declared as a feature")]
    TargetInFeatures { column: String },

    /// A column appears twice in the same feature group.
    #[error("column '{column}' is declared more than once in the {group} group")]
    DuplicateColumn { column: String, group: &'static str },

    /// Neither feature group declares a column.
    #[error("schema declares no feature columns")]
    NoFeatures,

    /// Target column name is blank.
    #[error("schema target column is empty")]
    EmptyTarget,

    // === Split Settings ===
    /// Evaluation ratio outside the open interval (0, 1).
    #[error("evaluation ratio must be between 0 and 1 (exclusive), got {ratio}")]
    InvalidEvalRatio { ratio: f64 },

    // === Config File Errors ===
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::PipelineConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be rendered as TOML.
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
