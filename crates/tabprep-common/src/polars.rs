//! Polars AnyValue utility functions.
//!
//! Cells arrive from CSV files as whatever dtype Polars inferred for the
//! column. These helpers give the preprocessing code a uniform view: a numeric
//! cell is either a number, missing, or an unparseable string, and a
//! categorical cell is either a trimmed label or missing.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// `Null` becomes an empty string; floats lose trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tabprep_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a float without trailing fractional zeros (`40.0` -> `"40"`).
///
/// # Examples
///
/// ```
/// use tabprep_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(100.0), "100");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Numeric view of a cell. Strings are parsed; anything else non-numeric is `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Reads a cell of a numeric feature column.
///
/// - `Ok(Some(v))`: an observed number
/// - `Ok(None)`: missing (null, NaN, or blank string)
/// - `Err(raw)`: a non-blank value that is not a finite number
pub fn numeric_cell(value: AnyValue<'_>) -> Result<Option<f64>, String> {
    if is_blank(&value) {
        return Ok(None);
    }
    match any_to_f64(value.clone()) {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(any_to_string(value)),
    }
}

/// Reads a cell of a categorical feature column.
///
/// Returns the trimmed label, or `None` when the cell is missing. Numeric
/// cells are rendered with [`format_numeric`] so `1.0` and `1` agree.
pub fn category_cell(value: AnyValue<'_>) -> Option<String> {
    let nan = match value {
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    };
    if nan {
        return None;
    }
    let label = any_to_string(value);
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_blank(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Float64(1.50)), "1.5");
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(1000.0), "1000");
        assert_eq!(format_numeric(40.50), "40.5");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String(" 2.5 ")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("invalid")), None);
    }

    #[test]
    fn test_numeric_cell_missing() {
        assert_eq!(numeric_cell(AnyValue::Null), Ok(None));
        assert_eq!(numeric_cell(AnyValue::String("  ")), Ok(None));
        assert_eq!(numeric_cell(AnyValue::Float64(f64::NAN)), Ok(None));
    }

    #[test]
    fn test_numeric_cell_values() {
        assert_eq!(numeric_cell(AnyValue::Int64(72)), Ok(Some(72.0)));
        assert_eq!(numeric_cell(AnyValue::String("3.5")), Ok(Some(3.5)));
        assert_eq!(
            numeric_cell(AnyValue::String("seventy")),
            Err("seventy".to_string())
        );
    }

    #[test]
    fn test_numeric_cell_rejects_infinity() {
        assert!(numeric_cell(AnyValue::Float64(f64::INFINITY)).is_err());
        assert!(numeric_cell(AnyValue::Float64(f64::NEG_INFINITY)).is_err());
        assert!(numeric_cell(AnyValue::String("inf")).is_err());
    }

    #[test]
    fn test_category_cell() {
        assert_eq!(category_cell(AnyValue::Null), None);
        assert_eq!(category_cell(AnyValue::String("")), None);
        assert_eq!(
            category_cell(AnyValue::String(" female ")),
            Some("female".to_string())
        );
        assert_eq!(category_cell(AnyValue::Int64(3)), Some("3".to_string()));
        assert_eq!(category_cell(AnyValue::Float64(f64::NAN)), None);
    }
}
