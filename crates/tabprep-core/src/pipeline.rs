//! Full pipeline run: ingestion, then transformation.

use std::time::{Duration, Instant};

use tabprep_ingest::{DataIngestion, SplitPaths};
use tabprep_model::PipelineConfig;
use tabprep_persistence::compute_file_hash;
use tracing::{info, info_span};

use crate::error::{Component, Result, ResultExt};
use crate::transformation::{DataTransformation, TransformationOutput};

/// Result of one complete pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Raw snapshot and split locations.
    pub splits: SplitPaths,
    /// Matrices and artifact location for model training.
    pub output: TransformationOutput,
    /// SHA-256 hex digest of the written artifact.
    pub artifact_digest: String,
    pub duration: Duration,
}

/// Run ingestion then transformation with `config`.
///
/// Fails fast: the first error aborts the run. Files written before the
/// failure stay on disk.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineRun> {
    let started = Instant::now();
    config.validate().at(Component::Pipeline, "validate_config")?;

    let splits = info_span!("ingest", source = %config.ingestion.source_path.display())
        .in_scope(|| {
            DataIngestion::new(&config.ingestion)
                .load_and_split(&config.ingestion.source_path)
                .at(Component::DataIngestion, "load_and_split")
        })?;

    let output = info_span!("transform")
        .in_scope(|| DataTransformation::new(config).transform(&splits.train, &splits.eval))?;

    let artifact_digest = compute_file_hash(&output.artifact_path)
        .at(Component::ArtifactStore, "compute_file_hash")?;

    let duration = started.elapsed();
    info!(
        artifact = %output.artifact_path.display(),
        sha256 = %artifact_digest,
        duration_ms = duration.as_millis() as u64,
        "pipeline completed"
    );

    Ok(PipelineRun {
        splits,
        output,
        artifact_digest,
        duration,
    })
}
