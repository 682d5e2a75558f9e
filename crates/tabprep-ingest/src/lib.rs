//! Data ingestion for the tabprep pipeline.
//!
//! This crate reads the raw tabular dataset, snapshots it, and produces the
//! deterministic train/evaluation split the transformation stage consumes.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files with a required header row into Polars DataFrames
//! - **Seeded Split**: Uniform, unstratified, reproducible partition of rows
//! - **Split Persistence**: Raw snapshot, train and evaluation files written with headers
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabprep_ingest::DataIngestion;
//! use tabprep_model::IngestionConfig;
//!
//! let config = IngestionConfig::default();
//! let paths = DataIngestion::new(&config).load_and_split(Path::new("students.csv"))?;
//! println!("train: {}, eval: {}", paths.train.display(), paths.eval.display());
//! ```

mod csv;
mod error;
mod ingestion;
mod split;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, check_file_size, read_csv_table, validate_dataframe_shape,
    validate_encoding, write_csv_table,
};

// === Splitting ===
pub use split::{DatasetSplit, eval_size, split_frame, split_indices};

// === Stage ===
pub use ingestion::{DataIngestion, SplitPaths};
