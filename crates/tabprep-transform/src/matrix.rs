//! Dense numeric feature matrix handed to model training.

use serde::Serialize;

use crate::error::{Result, TransformError};

/// Row-major `f64` matrix with named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Build from column-major blocks, one per name, each `rows` long.
    pub fn from_columns(columns: Vec<String>, values: Vec<Vec<f64>>, rows: usize) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(TransformError::RowCountMismatch {
                expected: columns.len(),
                actual: values.len(),
            });
        }
        if let Some(bad) = values.iter().find(|column| column.len() != rows) {
            return Err(TransformError::RowCountMismatch {
                expected: rows,
                actual: bad.len(),
            });
        }

        let width = columns.len();
        let mut data = vec![0.0; rows * width];
        for (col, column) in values.iter().enumerate() {
            for (row, value) in column.iter().enumerate() {
                data[row * width + col] = *value;
            }
        }
        Ok(Self {
            columns,
            rows,
            data,
        })
    }

    /// Append `values` as a new last column.
    pub fn with_column(self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.rows {
            return Err(TransformError::RowCountMismatch {
                expected: self.rows,
                actual: values.len(),
            });
        }

        let width = self.width();
        let mut data = Vec::with_capacity(self.rows * (width + 1));
        for (row, value) in values.into_iter().enumerate() {
            data.extend_from_slice(&self.data[row * width..(row + 1) * width]);
            data.push(value);
        }

        let mut columns = self.columns;
        columns.push(name.into());
        Ok(Self {
            columns,
            rows: self.rows,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.width())
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let width = self.width();
        (index < self.rows).then(|| &self.data[index * width..(index + 1) * width])
    }

    /// Copy of the column called `name`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let col = self.columns.iter().position(|c| c == name)?;
        let width = self.width();
        Some((0..self.rows).map(|row| self.data[row * width + col]).collect())
    }

    /// Row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
