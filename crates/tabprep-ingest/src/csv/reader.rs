//! CSV file reading with a required header row.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, normalize_frame_headers};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Cell spellings read as missing values in addition to empty fields.
const NULL_VALUES: [&str; 4] = ["NA", "N/A", "NaN", "null"];

const WIDE_TABLE_COLUMNS: usize = 500;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Reject files larger than `max_size` bytes.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let size = std::fs::metadata(path)
        .map_err(|e| open_error(path, e))?
        .len();
    match size {
        size if size > max_size => Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        }),
        _ => Ok(()),
    }
}

/// Reject UTF-16 input. A UTF-8 byte-order mark is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut prefix = Vec::with_capacity(2);
    File::open(path)
        .map_err(|e| open_error(path, e))?
        .take(2)
        .read_to_end(&mut prefix)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let encoding = match prefix.as_slice() {
        [0xFF, 0xFE] => "UTF-16 LE",
        [0xFE, 0xFF] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// A loaded table needs at least one row and a name for every column.
/// Very wide tables only log a warning.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    if df.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "dataset is unusually wide"
        );
    }
    Ok(())
}

/// Reads the first line of a file, without a UTF-8 BOM.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();

    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if bytes == 0 {
        return Ok(None);
    }

    let line = line.trim_end_matches(['\r', '\n']);
    Ok(Some(line.strip_prefix('\u{feff}').unwrap_or(line).to_string()))
}

/// Fail early on an empty file or a blank header line.
fn check_header_line(path: &Path) -> Result<()> {
    match read_first_line(path)? {
        None => Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        }),
        Some(line) if line.split(',').all(|cell| cell.trim().is_empty()) => {
            Err(IngestError::NoHeaderDetected {
                path: path.to_path_buf(),
            })
        }
        Some(_) => Ok(()),
    }
}

/// Reads a CSV file into a Polars DataFrame.
///
/// The first row must be a header; its names are trimmed. Empty fields and
/// the spellings in `NULL_VALUES` become nulls. Column types are inferred
/// over the whole file so a late non-numeric value cannot break parsing.
pub fn read_csv_table(path: &Path) -> Result<(DataFrame, CsvHeaders)> {
    check_file_size(path, MAX_CSV_FILE_SIZE)?;
    validate_encoding(path)?;
    check_header_line(path)?;

    let null_values = NULL_VALUES
        .iter()
        .copied()
        .map(PlSmallStr::from_static)
        .collect();
    let parse_options =
        CsvParseOptions::default().with_null_values(Some(NullValues::AllColumns(null_values)));

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let headers = normalize_frame_headers(&mut df)?;
    validate_dataframe_shape(&df, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV table"
    );
    Ok((df, headers))
}
