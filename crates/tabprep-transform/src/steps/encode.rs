//! One-hot encoding.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Expands a categorical column into one indicator column per training category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Sorted distinct training categories; output column order.
    pub categories: Vec<String>,
}

/// Indicator columns for one categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBlock {
    /// One column per category, each with one entry per row.
    pub columns: Vec<Vec<f64>>,
    /// Rows whose category is not in the vocabulary; their block is all zeros.
    pub unknown_rows: Vec<usize>,
}

impl OneHotEncoder {
    /// Learn the vocabulary from imputed values.
    pub fn fit(values: &[String]) -> Self {
        let categories: BTreeSet<&str> = values.iter().map(String::as_str).collect();
        Self {
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }

    /// Output width.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn apply(&self, values: &[String]) -> EncodedBlock {
        let mut columns = vec![vec![0.0; values.len()]; self.width()];
        let mut unknown_rows = Vec::new();

        for (row, value) in values.iter().enumerate() {
            match self.categories.binary_search(value) {
                Ok(position) => columns[position][row] = 1.0,
                Err(_) => unknown_rows.push(row),
            }
        }

        EncodedBlock {
            columns,
            unknown_rows,
        }
    }
}
