//! CSV file writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Writes a DataFrame as CSV with a header row.
///
/// Creates the parent directory when needed and replaces any existing file.
/// Nulls are written as empty fields so they read back as missing values.
pub fn write_csv_table(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|e| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    // CsvWriter::finish needs a mutable frame; the clone only copies column handles.
    let mut frame = df.clone();
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    writer.flush().map_err(|e| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), rows = df.height(), "wrote CSV table");
    Ok(())
}
