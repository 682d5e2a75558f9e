//! The data transformation stage.
//!
//! Loads the persisted splits, fits a fresh preprocessor on training features
//! only, applies it unchanged to both splits, appends the target, and writes
//! the fitted preprocessor as an artifact.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tabprep_ingest::read_csv_table;
use tabprep_model::PipelineConfig;
use tabprep_persistence::{load_preprocessor, save_preprocessor};
use tabprep_transform::{
    FeatureMatrix, PreprocessingBuilder, PreprocessingOptions, TransformError, require_columns,
    target_values,
};
use tracing::{debug, info};

use crate::error::{Component, Result, ResultExt};

const COMPONENT: Component = Component::DataTransformation;

/// What the transformation stage hands to model training.
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    /// Preprocessed training features with the target as the last column.
    pub train_matrix: FeatureMatrix,
    /// Preprocessed evaluation features with the target as the last column.
    pub eval_matrix: FeatureMatrix,
    /// Location of the fitted preprocessor artifact.
    pub artifact_path: PathBuf,
}

/// Builds, fits, applies, and persists the preprocessing transform.
#[derive(Debug, Clone, Copy)]
pub struct DataTransformation<'a> {
    config: &'a PipelineConfig,
}

impl<'a> DataTransformation<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Transform the splits at `train_path` and `eval_path`.
    ///
    /// Every schema column is checked in both splits before anything is
    /// fitted. The preprocessor is fitted on training features only.
    pub fn transform(&self, train_path: &Path, eval_path: &Path) -> Result<TransformationOutput> {
        let started = Instant::now();
        let schema = &self.config.schema;
        info!("data transformation started");

        let (train, _) = read_csv_table(train_path).at(COMPONENT, "load_train_split")?;
        let (eval, _) = read_csv_table(eval_path).at(COMPONENT, "load_eval_split")?;
        debug!(
            train_rows = train.height(),
            eval_rows = eval.height(),
            "splits loaded"
        );

        require_columns(&train, schema.required_columns()).at(COMPONENT, "check_train_schema")?;
        require_columns(&eval, schema.required_columns()).at(COMPONENT, "check_eval_schema")?;

        let (train_features, train_target) =
            split_target(&train, &schema.target_column).at(COMPONENT, "separate_train_target")?;
        let (eval_features, eval_target) =
            split_target(&eval, &schema.target_column).at(COMPONENT, "separate_eval_target")?;

        let options = PreprocessingOptions {
            unknown_categories: self.config.transformation.unknown_categories,
        };
        let mut preprocessor = PreprocessingBuilder::new(options)
            .build(schema)
            .at(COMPONENT, "build_preprocessor")?;

        preprocessor
            .fit(&train_features)
            .at(COMPONENT, "fit_preprocessor")?;

        let train_matrix = preprocessor
            .transform(&train_features)
            .and_then(|m| m.with_column(schema.target_column.as_str(), train_target))
            .at(COMPONENT, "transform_train")?;
        let eval_matrix = preprocessor
            .transform(&eval_features)
            .and_then(|m| m.with_column(schema.target_column.as_str(), eval_target))
            .at(COMPONENT, "transform_eval")?;

        let artifact_path = self.config.transformation.preprocessor_path.clone();
        save_preprocessor(&preprocessor, &artifact_path)
            .at(Component::ArtifactStore, "save_preprocessor")?;

        info!(
            train_shape = ?train_matrix.shape(),
            eval_shape = ?eval_matrix.shape(),
            artifact = %artifact_path.display(),
            duration_ms = started.elapsed().as_millis() as u64,
            "data transformation completed"
        );

        Ok(TransformationOutput {
            train_matrix,
            eval_matrix,
            artifact_path,
        })
    }
}

/// Drop the target column and return it separately as `f64` values.
fn split_target(
    frame: &DataFrame,
    target: &str,
) -> std::result::Result<(DataFrame, Vec<f64>), TransformError> {
    let values = target_values(frame, target)?;
    let features = frame.drop(target)?;
    Ok((features, values))
}

/// Transform a CSV file with a saved preprocessor.
///
/// The target column is appended when `target` is given and present in the
/// file; otherwise the matrix holds features only.
pub fn apply_artifact(
    artifact_path: &Path,
    data_path: &Path,
    target: Option<&str>,
) -> Result<FeatureMatrix> {
    let preprocessor =
        load_preprocessor(artifact_path).at(Component::ArtifactStore, "load_preprocessor")?;
    let (frame, headers) = read_csv_table(data_path).at(COMPONENT, "load_data")?;

    require_columns(
        &frame,
        preprocessor
            .numeric_columns()
            .iter()
            .chain(preprocessor.categorical_columns())
            .map(String::as_str),
    )
    .at(COMPONENT, "check_schema")?;

    let matrix = match target.filter(|name| headers.contains(name)) {
        Some(name) => {
            let (features, values) = split_target(&frame, name).at(COMPONENT, "separate_target")?;
            preprocessor
                .transform(&features)
                .and_then(|m| m.with_column(name, values))
                .at(COMPONENT, "transform")?
        }
        None => preprocessor.transform(&frame).at(COMPONENT, "transform")?,
    };

    info!(
        rows = matrix.rows(),
        columns = matrix.width(),
        "applied saved preprocessor"
    );
    Ok(matrix)
}
