//! Data model for the tabprep pipeline.
//!
//! This crate holds the types every stage agrees on:
//! - [`Schema`]: which columns are numeric features, categorical features, and the target
//! - [`PipelineConfig`]: ingestion, schema, and transformation settings for one run
//! - [`ConfigError`]: invalid schema or configuration
//!
//! Configuration is built once at process start (defaults, optionally a TOML
//! file, then CLI overrides) and passed by reference into each stage.

mod config;
mod error;
mod schema;

pub use config::{
    DEFAULT_SOURCE_PATH, IngestionConfig, PipelineConfig, TransformationConfig,
    UnknownCategoryPolicy,
};
pub use error::{ConfigError, Result};
pub use schema::Schema;
