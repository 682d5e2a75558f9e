//! Pipeline orchestration for tabprep.
//!
//! Wires the stages together:
//!
//! ```text
//! DataIngestion ──SplitPaths──▶ DataTransformation ──(train, eval, artifact)──▶ model training
//! ```
//!
//! - [`DataTransformation`]: fit on training features, apply to both splits, persist the artifact
//! - [`run_pipeline`]: one full run inside `ingest` and `transform` tracing spans
//! - [`PipelineError`]: every failure with its component, operation, and source location

mod error;
mod pipeline;
mod transformation;

pub use error::{Component, ErrorKind, Origin, PipelineError, Result, ResultExt, StageError};
pub use pipeline::{PipelineRun, run_pipeline};
pub use transformation::{DataTransformation, TransformationOutput, apply_artifact};
