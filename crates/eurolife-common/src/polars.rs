//! Polars AnyValue utility functions.
//!
//! Source tables arrive with whatever dtypes the CSV reader inferred, so a
//! "year" column may be `Int64`, `Float64` or `String` depending on the file.
//! These helpers give every stage one consistent view of a cell.

use polars::prelude::{AnyValue, DataFrame};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, formats floats without trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use eurolife_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("DE")), "DE");
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
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to `String`, returning `None` if the result is blank.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Returns true for null cells and cells holding only whitespace.
pub fn any_is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use eurolife_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(7.25), "7.25");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
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
        AnyValue::Float32(v) if !v.is_nan() => Some(f64::from(v)),
        AnyValue::Float64(v) if !v.is_nan() => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid, empty or NaN strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Interprets a cell as a calendar year.
///
/// Accepts integers and integral floats (`2013`, `2013.0`, `"2013"`,
/// `"2013.0"`). Fractional values are rejected rather than truncated.
pub fn parse_year(value: AnyValue<'_>) -> Option<i32> {
    let number = match value {
        AnyValue::String(s) => parse_i64(s).map(|v| v as f64).or_else(|| parse_f64(s)),
        AnyValue::StringOwned(s) => parse_i64(&s).map(|v| v as f64).or_else(|| parse_f64(&s)),
        other => any_to_f64(other),
    }?;
    if number.fract() != 0.0 {
        return None;
    }
    i32::try_from(number as i64).ok()
}

/// Collects every cell of a named column, in row order.
///
/// Returns `None` when the column does not exist.
pub fn column_cells<'a>(df: &'a DataFrame, name: &str) -> Option<Vec<AnyValue<'a>>> {
    let column = df.column(name).ok()?;
    let mut cells = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        cells.push(column.get(idx).unwrap_or(AnyValue::Null));
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::Float64(7.5)), "7.5");
        assert_eq!(any_to_string(AnyValue::Float64(2013.0)), "2013");
    }

    #[test]
    fn test_any_to_string_non_empty() {
        assert_eq!(any_to_string_non_empty(AnyValue::Null), None);
        assert_eq!(any_to_string_non_empty(AnyValue::String("  ")), None);
        assert_eq!(
            any_to_string_non_empty(AnyValue::String("EL")),
            Some("EL".to_string())
        );
    }

    #[test]
    fn test_any_is_missing() {
        assert!(any_is_missing(&AnyValue::Null));
        assert!(any_is_missing(&AnyValue::String(" ")));
        assert!(any_is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(!any_is_missing(&AnyValue::Float64(0.0)));
        assert!(!any_is_missing(&AnyValue::String("DE")));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(20000.0), "20000");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String(" 6.1 ")), Some(6.1));
        assert_eq!(any_to_f64(AnyValue::String(":")), None);
        assert_eq!(any_to_f64(AnyValue::String("NaN")), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(AnyValue::Int64(2013)), Some(2013));
        assert_eq!(parse_year(AnyValue::Float64(2018.0)), Some(2018));
        assert_eq!(parse_year(AnyValue::String("2021")), Some(2021));
        assert_eq!(parse_year(AnyValue::String("2022.0")), Some(2022));
        assert_eq!(parse_year(AnyValue::Float64(2022.5)), None);
        assert_eq!(parse_year(AnyValue::String("2022Q1")), None);
        assert_eq!(parse_year(AnyValue::Null), None);
    }

    #[test]
    fn test_column_cells() {
        let df = df! {
            "geo" => &["DE", "EL"],
        }
        .unwrap();
        let cells = column_cells(&df, "geo").unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(any_to_string(cells[1].clone()), "EL");
        assert!(column_cells(&df, "missing").is_none());
    }
}
