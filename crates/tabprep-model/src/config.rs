//! Pipeline configuration.
//!
//! Defaults reproduce the stock student-performance run: read
//! `Notebook/Data/StudentsPerformance.csv`, write everything under
//! `artifacts/`, hold out 20% of rows with seed 42.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::schema::Schema;

/// Default location of the raw dataset.
pub const DEFAULT_SOURCE_PATH: &str = "Notebook/Data/StudentsPerformance.csv";

const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
const RAW_FILE: &str = "data.csv";
const TRAIN_FILE: &str = "train.csv";
const EVAL_FILE: &str = "test.csv";
const PREPROCESSOR_FILE: &str = "preprocessor.tpp";

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ingestion: IngestionConfig,
    pub schema: Schema,
    pub transformation: TransformationConfig,
}

impl PipelineConfig {
    /// Load a configuration file; keys it omits keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Move every artifact (raw snapshot, splits, preprocessor) into `dir`,
    /// keeping the configured file names.
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: &Path) -> Self {
        let relocate = |path: &Path, fallback: &str| {
            dir.join(path.file_name().unwrap_or_else(|| OsStr::new(fallback)))
        };
        self.ingestion.raw_data_path = relocate(&self.ingestion.raw_data_path, RAW_FILE);
        self.ingestion.train_data_path = relocate(&self.ingestion.train_data_path, TRAIN_FILE);
        self.ingestion.eval_data_path = relocate(&self.ingestion.eval_data_path, EVAL_FILE);
        self.transformation.preprocessor_path =
            relocate(&self.transformation.preprocessor_path, PREPROCESSOR_FILE);
        self
    }

    /// Set the raw dataset location.
    #[must_use]
    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.ingestion.source_path = path;
        self
    }

    /// Validate schema and split settings.
    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        self.ingestion.validate()
    }
}

/// Settings for the ingestion stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Raw dataset to read.
    pub source_path: PathBuf,
    /// Unmodified snapshot of the raw dataset.
    pub raw_data_path: PathBuf,
    /// Training split.
    pub train_data_path: PathBuf,
    /// Evaluation split.
    pub eval_data_path: PathBuf,
    /// Fraction of rows held out for evaluation.
    pub eval_ratio: f64,
    /// Seed of the split permutation.
    pub seed: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        let dir = Path::new(DEFAULT_ARTIFACTS_DIR);
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            raw_data_path: dir.join(RAW_FILE),
            train_data_path: dir.join(TRAIN_FILE),
            eval_data_path: dir.join(EVAL_FILE),
            eval_ratio: 0.2,
            seed: 42,
        }
    }
}

impl IngestionConfig {
    /// Reject evaluation ratios outside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !(self.eval_ratio > 0.0 && self.eval_ratio < 1.0) {
            return Err(ConfigError::InvalidEvalRatio {
                ratio: self.eval_ratio,
            });
        }
        Ok(())
    }
}

/// How the one-hot encoder treats a category absent from the fit vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Encode the column's block as all zeros.
    #[default]
    Ignore,
    /// Fail the transform call.
    Error,
}

/// Settings for the transformation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationConfig {
    /// Where the fitted preprocessor artifact is written.
    pub preprocessor_path: PathBuf,
    /// Policy for categories unseen at fit time.
    pub unknown_categories: UnknownCategoryPolicy,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            preprocessor_path: Path::new(DEFAULT_ARTIFACTS_DIR).join(PREPROCESSOR_FILE),
            unknown_categories: UnknownCategoryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.ingestion.eval_ratio, 0.2);
        assert_eq!(config.ingestion.seed, 42);
        assert_eq!(
            config.ingestion.train_data_path,
            Path::new("artifacts").join("train.csv")
        );
        assert_eq!(
            config.transformation.preprocessor_path,
            Path::new("artifacts").join("preprocessor.tpp")
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_with_artifacts_dir() {
        let config = PipelineConfig::default().with_artifacts_dir(Path::new("/tmp/run"));
        assert_eq!(config.ingestion.raw_data_path, Path::new("/tmp/run/data.csv"));
        assert_eq!(config.ingestion.eval_data_path, Path::new("/tmp/run/test.csv"));
        assert_eq!(
            config.transformation.preprocessor_path,
            Path::new("/tmp/run/preprocessor.tpp")
        );
    }

    #[test]
    fn test_invalid_ratio() {
        let mut config = PipelineConfig::default();
        config.ingestion.eval_ratio = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEvalRatio { .. })
        ));
        config.ingestion.eval_ratio = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: PipelineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
