use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, info_span};

use tabprep_cli::config::ConfigArgs;
use tabprep_core::{PipelineRun, apply_artifact, run_pipeline};
use tabprep_persistence::{PreprocessorArtifact, load_artifact};
use tabprep_transform::FeatureMatrix;

use crate::cli::{ApplyArgs, InspectArgs};

pub fn run_run(args: &ConfigArgs) -> Result<PipelineRun> {
    let config = args.resolve()?;
    let span = info_span!("run", source = %config.ingestion.source_path.display());
    let _guard = span.enter();
    info!("pipeline started");
    Ok(run_pipeline(&config)?)
}

pub fn run_inspect(args: &InspectArgs) -> Result<PreprocessorArtifact> {
    let artifact = load_artifact(&args.artifact)?;
    info!(
        path = %args.artifact.display(),
        schema_version = artifact.schema_version,
        "artifact loaded"
    );
    Ok(artifact)
}

/// Render an artifact as pretty-printed JSON.
pub fn artifact_json(artifact: PreprocessorArtifact) -> Result<String> {
    let schema_version = artifact.schema_version;
    let created_at = artifact.created_at.clone();
    let tool_version = artifact.tool_version.clone();
    let preprocessor = artifact.into_preprocessor();
    let params = preprocessor.params()?;

    let document = json!({
        "schema_version": schema_version,
        "created_at": created_at,
        "tool_version": tool_version,
        "unknown_categories": preprocessor.options().unknown_categories,
        "params": params,
    });
    serde_json::to_string_pretty(&document).context("failed to render artifact as JSON")
}

pub fn run_apply(args: &ApplyArgs) -> Result<FeatureMatrix> {
    let span = info_span!("apply", artifact = %args.artifact.display());
    let _guard = span.enter();
    Ok(apply_artifact(
        &args.artifact,
        &args.csv,
        Some(args.target.as_str()),
    )?)
}

pub fn run_schema(args: &ConfigArgs) -> Result<String> {
    let config = args.resolve()?;
    config
        .to_toml()
        .context("failed to render configuration as TOML")
}
