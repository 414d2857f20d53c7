//! Polars AnyValue utility functions.
//!
//! Helpers for reading cells out of text-typed columns: string
//! conversion, numeric parsing, and missing-value detection.

use polars::prelude::*;

/// Text tokens read as missing: the NA markers commonly written by
/// spreadsheet and dataframe CSV exports.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
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

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
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

/// Parses a string as f64, returning None for invalid, empty or NaN strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Returns true if a text cell counts as missing.
///
/// The cell is matched as-is: a whitespace-only cell is a value.
pub fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

/// Returns true if a cell is null, NaN, or a missing-value token.
pub fn is_missing_value(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => is_missing_token(s),
        AnyValue::StringOwned(s) => is_missing_token(s),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(75.0), "75");
        assert_eq!(format_numeric(98.50), "98.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn test_any_to_f64_parses_text() {
        assert_eq!(any_to_f64(AnyValue::String("  107.5 ")), Some(107.5));
        assert_eq!(any_to_f64(AnyValue::String("NaN")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(3)), Some(3.0));
    }

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing_token("NULL"));
        assert!(is_missing_token("null"));
        assert!(is_missing_token("#N/A N/A"));
        assert!(is_missing_token("NA"));
        assert!(is_missing_token(""));
        assert!(!is_missing_token("  NA "));
        assert!(!is_missing_token(" "));
        assert!(!is_missing_token("PRT"));
        assert!(!is_missing_token("0"));
    }

    #[test]
    fn test_missing_values() {
        assert!(is_missing_value(&AnyValue::Null));
        assert!(is_missing_value(&AnyValue::Float64(f64::NAN)));
        assert!(is_missing_value(&AnyValue::String("nan")));
        assert!(!is_missing_value(&AnyValue::Float64(0.0)));
        assert!(!is_missing_value(&AnyValue::String("City Hotel")));
    }
}
