//! Reading typed column values out of a DataFrame.

use polars::prelude::*;
use tabprep_common::{category_cell, numeric_cell};

use crate::error::{Result, TransformError};

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column> {
    frame
        .column(name)
        .map_err(|_| TransformError::MissingColumn {
            column: name.to_string(),
        })
}

/// Values of a numeric column; `None` marks a missing cell.
pub fn numeric_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = column(frame, name)?;
    (0..col.len())
        .map(|row| {
            numeric_cell(col.get(row)?).map_err(|value| TransformError::NonNumericValue {
                column: name.to_string(),
                row,
                value,
            })
        })
        .collect()
}

/// Values of a categorical column; `None` marks a missing cell.
pub fn category_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = column(frame, name)?;
    (0..col.len())
        .map(|row| Ok(category_cell(col.get(row)?)))
        .collect()
}

/// Values of the target column. Missing targets become `NaN`.
pub fn target_values(frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(numeric_values(frame, name)?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Fail with [`TransformError::MissingColumn`] on the first absent column.
pub fn require_columns<'a>(
    frame: &DataFrame,
    columns: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    for name in columns {
        column(frame, name)?;
    }
    Ok(())
}
