//! The composed preprocessing transform and its builder.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tabprep_model::{ConfigError, Schema, UnknownCategoryPolicy};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::matrix::FeatureMatrix;
use crate::strategy::{
    CategoricalColumnParams, CategoricalPipeline, ColumnStrategy, NumericColumnParams,
    NumericPipeline,
};

/// Options that shape a preprocessor but are not part of the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessingOptions {
    pub unknown_categories: UnknownCategoryPolicy,
}

/// Everything a fitted preprocessor learned from its training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedParams {
    /// Numeric columns in output order.
    pub numeric: Vec<NumericColumnParams>,
    /// Categorical columns in output order.
    pub categorical: Vec<CategoricalColumnParams>,
    /// Number of training rows fitted on.
    pub fitted_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Unfit,
    Fit(FittedParams),
}

/// Composes the numeric and categorical strategies from a schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreprocessingBuilder {
    options: PreprocessingOptions,
}

impl PreprocessingBuilder {
    pub fn new(options: PreprocessingOptions) -> Self {
        Self { options }
    }

    /// Build an unfit preprocessor for `schema`.
    ///
    /// Pure configuration: no data is read. Fails when the schema is not well
    /// formed.
    pub fn build(&self, schema: &Schema) -> std::result::Result<Preprocessor, ConfigError> {
        schema.validate()?;
        debug!(
            numeric = schema.numeric_columns.len(),
            categorical = schema.categorical_columns.len(),
            "built preprocessor"
        );
        Ok(Preprocessor {
            numeric: NumericPipeline::new(schema.numeric_columns.clone()),
            categorical: CategoricalPipeline::new(
                schema.categorical_columns.clone(),
                self.options.unknown_categories,
            ),
            options: self.options,
            state: State::Unfit,
        })
    }
}

/// Numeric and categorical preprocessing with fit-once semantics.
///
/// A preprocessor is fitted exactly once, on training features, and afterwards
/// only transforms. Fitting again or transforming before fitting fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessor {
    numeric: NumericPipeline,
    categorical: CategoricalPipeline,
    options: PreprocessingOptions,
    state: State,
}

impl Preprocessor {
    /// Rebuild a fitted preprocessor from previously learned parameters.
    pub fn from_params(options: PreprocessingOptions, params: FittedParams) -> Self {
        let numeric = params.numeric.iter().map(|p| p.column.clone()).collect();
        let categorical = params
            .categorical
            .iter()
            .map(|p| p.column.clone())
            .collect();
        Self {
            numeric: NumericPipeline::new(numeric),
            categorical: CategoricalPipeline::new(categorical, options.unknown_categories),
            options,
            state: State::Fit(params),
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, State::Fit(_))
    }

    pub fn options(&self) -> PreprocessingOptions {
        self.options
    }

    pub fn numeric_columns(&self) -> &[String] {
        self.numeric.columns()
    }

    pub fn categorical_columns(&self) -> &[String] {
        self.categorical.columns()
    }

    /// Learned parameters; fails with [`TransformError::NotFitted`] before `fit`.
    pub fn params(&self) -> Result<&FittedParams> {
        match &self.state {
            State::Fit(params) => Ok(params),
            State::Unfit => Err(TransformError::NotFitted),
        }
    }

    /// Learn imputation, scaling, and vocabulary parameters from `features`.
    pub fn fit(&mut self, features: &DataFrame) -> Result<()> {
        if self.is_fitted() {
            return Err(TransformError::AlreadyFitted);
        }

        let numeric = self.numeric.fit(features)?;
        let categorical = self.categorical.fit(features)?;
        let params = FittedParams {
            numeric,
            categorical,
            fitted_rows: features.height(),
        };

        info!(
            rows = params.fitted_rows,
            features = self.width_of(&params),
            "preprocessor fitted"
        );
        self.state = State::Fit(params);
        Ok(())
    }

    /// Apply the learned parameters to `features`. Never changes them.
    pub fn transform(&self, features: &DataFrame) -> Result<FeatureMatrix> {
        let params = self.params()?;

        let mut blocks = self.numeric.apply(features, &params.numeric)?;
        blocks.extend(self.categorical.apply(features, &params.categorical)?);

        let matrix = FeatureMatrix::from_columns(self.names_of(params), blocks, features.height())?;
        debug!(
            rows = matrix.rows(),
            columns = matrix.width(),
            "features transformed"
        );
        Ok(matrix)
    }

    /// Output column names: numeric columns, then each categorical column's
    /// categories in vocabulary order.
    pub fn feature_names(&self) -> Result<Vec<String>> {
        Ok(self.names_of(self.params()?))
    }

    fn names_of(&self, params: &FittedParams) -> Vec<String> {
        let mut names = self.numeric.feature_names(&params.numeric);
        names.extend(self.categorical.feature_names(&params.categorical));
        names
    }

    fn width_of(&self, params: &FittedParams) -> usize {
        params.numeric.len()
            + params
                .categorical
                .iter()
                .map(|p| p.encoder.width())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn schema() -> Schema {
        Schema::new(["score"], ["group"], "target")
    }

    fn frame() -> DataFrame {
        df!(
            "score" => [Some(10.0), Some(20.0), None, Some(30.0)],
            "group" => [Some("b"), Some("a"), Some("b"), None],
            "target" => [1.0, 2.0, 3.0, 4.0],
        )
        .unwrap()
    }

    #[test]
    fn test_build_rejects_bad_schema() {
        let bad = Schema::new(["x"], ["x"], "y");
        assert!(matches!(
            PreprocessingBuilder::default().build(&bad),
            Err(ConfigError::OverlappingColumn { .. })
        ));
    }

    #[test]
    fn test_transform_before_fit() {
        let preprocessor = PreprocessingBuilder::default().build(&schema()).unwrap();
        assert!(!preprocessor.is_fitted());
        assert!(matches!(
            preprocessor.transform(&frame()),
            Err(TransformError::NotFitted)
        ));
        assert!(matches!(preprocessor.params(), Err(TransformError::NotFitted)));
    }

    #[test]
    fn test_fit_twice() {
        let mut preprocessor = PreprocessingBuilder::default().build(&schema()).unwrap();
        preprocessor.fit(&frame()).unwrap();
        assert!(matches!(
            preprocessor.fit(&frame()),
            Err(TransformError::AlreadyFitted)
        ));
    }

    #[test]
    fn test_fit_transform_shape() {
        let mut preprocessor = PreprocessingBuilder::default().build(&schema()).unwrap();
        preprocessor.fit(&frame()).unwrap();

        let matrix = preprocessor.transform(&frame()).unwrap();
        assert_eq!(matrix.shape(), (4, 3));
        assert_eq!(
            preprocessor.feature_names().unwrap(),
            vec!["num__score", "cat__group_a", "cat__group_b"]
        );

        let params = preprocessor.params().unwrap();
        assert_eq!(params.numeric[0].imputer.fill_value, 20.0);
        assert_eq!(params.categorical[0].imputer.fill_value, "b");
        assert_eq!(params.fitted_rows, 4);
    }

    #[test]
    fn test_from_params_matches_original() {
        let mut preprocessor = PreprocessingBuilder::default().build(&schema()).unwrap();
        preprocessor.fit(&frame()).unwrap();

        let rebuilt = Preprocessor::from_params(
            preprocessor.options(),
            preprocessor.params().unwrap().clone(),
        );
        assert_eq!(rebuilt, preprocessor);
        assert_eq!(
            rebuilt.transform(&frame()).unwrap(),
            preprocessor.transform(&frame()).unwrap()
        );
    }
}
