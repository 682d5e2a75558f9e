//! Header row normalization.

use polars::prelude::{DataFrame, PolarsResult};

/// Column names of a loaded CSV file, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if the header names `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Header cell as used for column lookup: no byte-order mark, no
/// surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Rename the frame's columns to their normalized form.
pub(crate) fn normalize_frame_headers(df: &mut DataFrame) -> PolarsResult<CsvHeaders> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_header(name.as_str()))
        .collect();
    df.set_column_names(columns.iter().map(String::as_str))?;
    Ok(CsvHeaders::new(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_contains() {
        let headers = CsvHeaders::new(vec!["gender".to_string(), "math score".to_string()]);
        assert_eq!(headers.len(), 2);
        assert!(headers.contains("math score"));
        assert!(!headers.contains("lunch"));
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  lunch "), "lunch");
        assert_eq!(normalize_header("\u{feff}gender"), "gender");
    }

    #[test]
    fn test_normalize_frame_headers() {
        let mut df = df!(" gender" => ["female"], "math score " => [72i64]).unwrap();
        let headers = normalize_frame_headers(&mut df).unwrap();

        assert_eq!(headers.columns, vec!["gender", "math score"]);
        assert!(df.column("math score").is_ok());
    }
}
