//! Shared utilities for tabprep crates.

pub mod polars;

pub use polars::{
    any_to_f64, any_to_string, category_cell, format_numeric, numeric_cell, parse_f64,
};
