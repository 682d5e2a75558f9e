//! Per-column-group preprocessing strategies.
//!
//! A strategy owns a list of columns and a fixed sequence of steps. Fitting
//! returns the learned state as a separate value, so the strategy itself is
//! pure configuration and applying never touches what was learned.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tabprep_model::UnknownCategoryPolicy;
use tracing::warn;

use crate::error::{Result, TransformError};
use crate::frame::{category_values, numeric_values};
use crate::steps::{MedianImputer, MostFrequentImputer, OneHotEncoder, StandardScaler};

/// Prefix of numeric output column names.
pub const NUMERIC_PREFIX: &str = "num__";
/// Prefix of categorical output column names.
pub const CATEGORICAL_PREFIX: &str = "cat__";

/// A fit/apply preprocessing strategy for a group of columns.
pub trait ColumnStrategy {
    /// Parameters learned by [`ColumnStrategy::fit`].
    type State;

    /// Input columns in declared order.
    fn columns(&self) -> &[String];

    /// Learn parameters from training data.
    fn fit(&self, frame: &DataFrame) -> Result<Self::State>;

    /// Transform `frame` with learned parameters, returning one output column
    /// per entry of [`ColumnStrategy::feature_names`].
    fn apply(&self, frame: &DataFrame, state: &Self::State) -> Result<Vec<Vec<f64>>>;

    /// Output column names in output order.
    fn feature_names(&self, state: &Self::State) -> Vec<String>;
}

/// Learned parameters of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnParams {
    pub column: String,
    pub imputer: MedianImputer,
    pub scaler: StandardScaler,
}

/// Median imputation followed by standardization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericPipeline {
    columns: Vec<String>,
}

impl NumericPipeline {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl ColumnStrategy for NumericPipeline {
    type State = Vec<NumericColumnParams>;

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn fit(&self, frame: &DataFrame) -> Result<Self::State> {
        self.columns
            .iter()
            .map(|column| {
                let values = numeric_values(frame, column)?;
                let imputer =
                    MedianImputer::fit(&values).ok_or_else(|| TransformError::NoObservedValues {
                        column: column.clone(),
                    })?;
                let scaler = StandardScaler::fit(&imputer.apply(&values));
                Ok(NumericColumnParams {
                    column: column.clone(),
                    imputer,
                    scaler,
                })
            })
            .collect()
    }

    fn apply(&self, frame: &DataFrame, state: &Self::State) -> Result<Vec<Vec<f64>>> {
        state
            .iter()
            .map(|params| {
                let values = numeric_values(frame, &params.column)?;
                Ok(params.scaler.apply(&params.imputer.apply(&values)))
            })
            .collect()
    }

    fn feature_names(&self, state: &Self::State) -> Vec<String> {
        state
            .iter()
            .map(|params| format!("{NUMERIC_PREFIX}{}", params.column))
            .collect()
    }
}

/// Learned parameters of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalColumnParams {
    pub column: String,
    pub imputer: MostFrequentImputer,
    pub encoder: OneHotEncoder,
}

/// Most-frequent imputation followed by one-hot encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalPipeline {
    columns: Vec<String>,
    unknown_categories: UnknownCategoryPolicy,
}

impl CategoricalPipeline {
    pub fn new(columns: Vec<String>, unknown_categories: UnknownCategoryPolicy) -> Self {
        Self {
            columns,
            unknown_categories,
        }
    }

    pub fn unknown_categories(&self) -> UnknownCategoryPolicy {
        self.unknown_categories
    }
}

impl ColumnStrategy for CategoricalPipeline {
    type State = Vec<CategoricalColumnParams>;

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn fit(&self, frame: &DataFrame) -> Result<Self::State> {
        self.columns
            .iter()
            .map(|column| {
                let values = category_values(frame, column)?;
                let imputer = MostFrequentImputer::fit(&values).ok_or_else(|| {
                    TransformError::NoObservedValues {
                        column: column.clone(),
                    }
                })?;
                let encoder = OneHotEncoder::fit(&imputer.apply(&values));
                Ok(CategoricalColumnParams {
                    column: column.clone(),
                    imputer,
                    encoder,
                })
            })
            .collect()
    }

    fn apply(&self, frame: &DataFrame, state: &Self::State) -> Result<Vec<Vec<f64>>> {
        let mut output = Vec::new();
        for params in state {
            let values = params.imputer.apply(&category_values(frame, &params.column)?);
            let block = params.encoder.apply(&values);

            if let Some(&row) = block.unknown_rows.first() {
                match self.unknown_categories {
                    UnknownCategoryPolicy::Error => {
                        return Err(TransformError::UnknownCategory {
                            column: params.column.clone(),
                            value: values[row].clone(),
                        });
                    }
                    UnknownCategoryPolicy::Ignore => warn!(
                        column = %params.column,
                        count = block.unknown_rows.len(),
                        "unseen categories encoded as all zeros"
                    ),
                }
            }
            output.extend(block.columns);
        }
        Ok(output)
    }

    fn feature_names(&self, state: &Self::State) -> Vec<String> {
        state
            .iter()
            .flat_map(|params| {
                params
                    .encoder
                    .categories
                    .iter()
                    .map(move |category| format!("{CATEGORICAL_PREFIX}{}_{category}", params.column))
            })
            .collect()
    }
}
