//! The ingestion stage: load, snapshot, split, persist.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tabprep_model::IngestionConfig;
use tracing::info;

use crate::csv::{read_csv_table, write_csv_table};
use crate::error::Result;
use crate::split::split_frame;

/// Locations written by [`DataIngestion::load_and_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    /// Unmodified snapshot of the source dataset.
    pub raw: PathBuf,
    pub train: PathBuf,
    pub eval: PathBuf,
}

/// Loads the raw dataset and produces the persisted train/evaluation split.
#[derive(Debug, Clone, Copy)]
pub struct DataIngestion<'a> {
    config: &'a IngestionConfig,
}

impl<'a> DataIngestion<'a> {
    pub fn new(config: &'a IngestionConfig) -> Self {
        Self { config }
    }

    /// Read `source`, write the raw snapshot, split with the configured ratio
    /// and seed, and write both subsets with a header row.
    ///
    /// Returns only the output locations. Files written before a failure are
    /// left in place.
    pub fn load_and_split(&self, source: &Path) -> Result<SplitPaths> {
        let started = Instant::now();
        info!(source = %source.display(), "data ingestion started");

        self.config.validate()?;

        let (df, _headers) = read_csv_table(source)?;
        info!(rows = df.height(), columns = df.width(), "dataset loaded");

        // The writer creates missing output directories.
        write_csv_table(&df, &self.config.raw_data_path)?;

        let split = split_frame(&df, self.config.eval_ratio, self.config.seed)?;
        info!(
            train_rows = split.train.height(),
            eval_rows = split.eval.height(),
            seed = self.config.seed,
            "train/evaluation split created"
        );

        write_csv_table(&split.train, &self.config.train_data_path)?;
        write_csv_table(&split.eval, &self.config.eval_data_path)?;

        info!(
            train = %self.config.train_data_path.display(),
            eval = %self.config.eval_data_path.display(),
            duration_ms = started.elapsed().as_millis() as u64,
            "data ingestion completed"
        );

        Ok(SplitPaths {
            raw: self.config.raw_data_path.clone(),
            train: self.config.train_data_path.clone(),
            eval: self.config.eval_data_path.clone(),
        })
    }
}
