//! Error types for preprocessing.

use tabprep_model::ConfigError;
use thiserror::Error;

/// Errors raised while building, fitting, or applying a preprocessor.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Schema definition rejected by the builder.
    #[error(transparent)]
    Config(#[from] ConfigError),

    // === Data Errors ===
    /// A column the schema requires is absent from the frame.
    #[error("column '{column}' is missing from the data")]
    MissingColumn { column: String },

    /// A numeric column holds a value that is not a finite number.
    #[error("column '{column}' row {row}: '{value}' is not a finite number")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    /// A feature column has no non-missing values in the training data.
    #[error("column '{column}' has no observed values to fit on")]
    NoObservedValues { column: String },

    /// A categorical value was not seen when the encoder was fitted.
    #[error("column '{column}': category '{value}' was not seen during fitting")]
    UnknownCategory { column: String, value: String },

    /// Feature blocks and target disagree on the number of rows.
    #[error("expected {expected} rows, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    // === State Errors ===
    /// `transform` or `params` called before `fit`.
    #[error("preprocessor has not been fitted")]
    NotFitted,

    /// `fit` called on a preprocessor that already holds learned parameters.
    #[error("preprocessor is already fitted; build a new one to refit")]
    AlreadyFitted,

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

/// Broad category of a [`TransformError`], used by the pipeline error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformErrorKind {
    /// Invalid schema definition.
    Config,
    /// Data does not fit the declared schema.
    Schema,
    /// Lifecycle misuse (fit twice, transform before fit).
    State,
}

impl TransformError {
    pub fn kind(&self) -> TransformErrorKind {
        match self {
            Self::Config(_) => TransformErrorKind::Config,
            Self::NotFitted | Self::AlreadyFitted => TransformErrorKind::State,
            Self::MissingColumn { .. }
            | Self::NonNumericValue { .. }
            | Self::NoObservedValues { .. }
            | Self::UnknownCategory { .. }
            | Self::RowCountMismatch { .. }
            | Self::DataFrame { .. } => TransformErrorKind::Schema,
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for preprocessing operations.
pub type Result<T> = std::result::Result<T, TransformError>;
