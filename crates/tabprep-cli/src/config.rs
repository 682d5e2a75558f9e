//! Effective configuration for a command.
//!
//! Precedence, lowest first: built-in defaults, the `--config` TOML file,
//! then individual flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tabprep_model::PipelineConfig;

/// Flags shared by every command that needs a pipeline configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// TOML configuration file; omitted keys keep their defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Raw dataset to ingest (overrides `ingestion.source_path`).
    #[arg(long = "source", value_name = "CSV")]
    pub source: Option<PathBuf>,

    /// Directory for the raw snapshot, splits, and preprocessor artifact.
    #[arg(long = "artifacts-dir", value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Resolve the configuration these flags describe.
    ///
    /// The result is not validated; the pipeline validates before it touches
    /// any file.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = &self.artifacts_dir {
            config = config.with_artifacts_dir(dir);
        }
        if let Some(source) = &self.source {
            config = config.with_source(source.clone());
        }
        Ok(config)
    }
}
