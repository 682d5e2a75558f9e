//! Seeded train/evaluation splitting.
//!
//! The split is a uniform random permutation of row positions drawn from a
//! seeded `StdRng`. The first `eval_size(n, ratio)` positions of the
//! permutation form the evaluation subset and the remainder the training
//! subset, each kept in permutation order. No stratification.

use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{IngestError, Result};

/// Slack subtracted before rounding up so `0.2 * 15` gives 3 rather than 4.
const RATIO_EPSILON: f64 = 1e-9;

/// Training and evaluation subsets of one dataset.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: DataFrame,
    pub eval: DataFrame,
}

/// Number of evaluation rows for `rows` records: `ceil(rows * ratio)`.
pub fn eval_size(rows: usize, ratio: f64) -> usize {
    ((rows as f64) * ratio - RATIO_EPSILON).ceil().max(0.0) as usize
}

/// Partition `0..rows` into (train, eval) row positions.
///
/// Fails with [`IngestError::InsufficientRows`] unless both subsets get at
/// least one row.
pub fn split_indices(rows: usize, ratio: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    let n_eval = eval_size(rows, ratio);
    if n_eval == 0 || n_eval >= rows {
        return Err(IngestError::InsufficientRows { rows, ratio });
    }

    let mut permutation: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_eval);
    Ok((train, permutation))
}

/// Split a DataFrame into training and evaluation subsets.
pub fn split_frame(df: &DataFrame, ratio: f64, seed: u64) -> Result<DatasetSplit> {
    let (train_rows, eval_rows) = split_indices(df.height(), ratio, seed)?;
    Ok(DatasetSplit {
        train: take_rows(df, &train_rows)?,
        eval: take_rows(df, &eval_rows)?,
    })
}

fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame> {
    let positions = rows
        .iter()
        .map(|&row| {
            IdxSize::try_from(row).map_err(|_| IngestError::DataFrame {
                message: format!("row index {row} exceeds the supported frame size"),
            })
        })
        .collect::<Result<Vec<IdxSize>>>()?;
    let idx = IdxCa::from_vec("row".into(), positions);
    Ok(df.take(&idx)?)
}
