//! Learned-parameter snapshots.

use rkyv::{Archive, Deserialize, Serialize};

/// Everything a fitted preprocessor learned.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct FittedParamsSnapshot {
    /// Numeric columns in output order.
    pub numeric: Vec<NumericColumnSnapshot>,

    /// Categorical columns in output order.
    pub categorical: Vec<CategoricalColumnSnapshot>,

    /// Number of training rows the parameters were learned from.
    pub fitted_rows: u64,
}

/// Median fill value and scaling statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct NumericColumnSnapshot {
    pub column: String,
    pub fill_value: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Mode fill value and vocabulary of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct CategoricalColumnSnapshot {
    pub column: String,
    pub fill_value: String,
    /// Sorted; order of the one-hot output columns.
    pub categories: Vec<String>,
}
