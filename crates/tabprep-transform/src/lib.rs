//! Feature preprocessing for the tabprep pipeline.
//!
//! Provides a fit/apply preprocessing transform composed from independent
//! per-column-group strategies.
//!
//! # Overview
//!
//! - **Numeric columns**: median imputation, then standardization
//! - **Categorical columns**: most-frequent imputation, then one-hot encoding
//! - **Lifecycle**: a [`Preprocessor`] is built unfit, fitted once on training
//!   features, then only transforms
//!
//! # Example
//!
//! ```ignore
//! use tabprep_model::Schema;
//! use tabprep_transform::{PreprocessingBuilder, PreprocessingOptions};
//!
//! let mut preprocessor = PreprocessingBuilder::new(PreprocessingOptions::default())
//!     .build(&Schema::student_performance())?;
//! preprocessor.fit(&train_features)?;
//! let train = preprocessor.transform(&train_features)?;
//! let eval = preprocessor.transform(&eval_features)?;
//! ```

mod error;
mod frame;
mod matrix;
mod preprocessor;
mod strategy;

pub mod steps;

// Error type
pub use error::{Result, TransformError, TransformErrorKind};

// Column access
pub use frame::{category_values, numeric_values, require_columns, target_values};

// Output
pub use matrix::FeatureMatrix;

// Strategies
pub use strategy::{
    CATEGORICAL_PREFIX, CategoricalColumnParams, CategoricalPipeline, ColumnStrategy,
    NUMERIC_PREFIX, NumericColumnParams, NumericPipeline,
};

// Composed transform
pub use preprocessor::{FittedParams, PreprocessingBuilder, PreprocessingOptions, Preprocessor};
