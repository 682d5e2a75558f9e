//! Pipeline error with origin context.
//!
//! Every failure that leaves a pipeline operation is wrapped exactly once, at
//! the boundary of the operation that observed it, into a [`PipelineError`]
//! carrying the component, the operation name, and the source location of the
//! wrapping call. The original error stays reachable through
//! [`std::error::Error::source`].

use std::fmt;
use std::panic::Location;

use tabprep_ingest::IngestError;
use tabprep_model::ConfigError;
use tabprep_persistence::PersistenceError;
use tabprep_transform::{TransformError, TransformErrorKind};
use thiserror::Error;

/// Pipeline component an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Pipeline,
    DataIngestion,
    DataTransformation,
    ArtifactStore,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pipeline => "Pipeline",
            Self::DataIngestion => "DataIngestion",
            Self::DataTransformation => "DataTransformation",
            Self::ArtifactStore => "ArtifactStore",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a failure was observed.
#[derive(Debug, Clone, Copy)]
pub struct Origin {
    pub component: Component,
    pub operation: &'static str,
    pub location: &'static Location<'static>,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} failed at {}:{}",
            self.component,
            self.operation,
            self.location.file(),
            self.location.line()
        )
    }
}

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raw data could not be read, parsed, split, or written.
    Ingestion,
    /// Schema definition or settings are invalid.
    Config,
    /// Data does not match the declared schema.
    Schema,
    /// Transform lifecycle misuse.
    State,
    /// Artifact could not be written or read back.
    Persistence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ingestion => "IngestionError",
            Self::Config => "ConfigError",
            Self::Schema => "SchemaError",
            Self::State => "StateError",
            Self::Persistence => "PersistenceError",
        })
    }
}

/// Underlying failure of a pipeline operation.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ingest(IngestError::Config(_)) | Self::Config(_) => ErrorKind::Config,
            Self::Ingest(_) => ErrorKind::Ingestion,
            Self::Transform(e) => match e.kind() {
                TransformErrorKind::Config => ErrorKind::Config,
                TransformErrorKind::Schema => ErrorKind::Schema,
                TransformErrorKind::State => ErrorKind::State,
            },
            Self::Persistence(PersistenceError::NotFitted) => ErrorKind::State,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// A failed pipeline operation.
#[derive(Debug, Error)]
#[error("{origin}: {source}")]
pub struct PipelineError {
    origin: Origin,
    #[source]
    source: StageError,
}

impl PipelineError {
    /// Wrap `source`, recording the caller's location.
    #[track_caller]
    pub fn new(
        component: Component,
        operation: &'static str,
        source: impl Into<StageError>,
    ) -> Self {
        Self {
            origin: Origin {
                component,
                operation,
                location: Location::caller(),
            },
            source: source.into(),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    pub fn stage_error(&self) -> &StageError {
        &self.source
    }

    /// Remediation hint, when the underlying error offers one.
    pub fn hint(&self) -> Option<&'static str> {
        match &self.source {
            StageError::Persistence(e) => e.suggestion(),
            _ => None,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Attach an origin to a stage result.
pub trait ResultExt<T> {
    /// Wrap the error, if any, recording the caller's location.
    #[track_caller]
    fn at(self, component: Component, operation: &'static str) -> Result<T>;
}

impl<T, E: Into<StageError>> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn at(self, component: Component, operation: &'static str) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(PipelineError::new(component, operation, e)),
        }
    }
}
