//! Shared utilities for the quality engine.
//!
//! Dtype classification for polars interop, plus the rounding and number
//! formatting rules shared by reports and chart labels.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a polars data type as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/categorical text
    String,
    /// Anything the engine cannot represent
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType carries a calendar timestamp. Time-of-day is excluded.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Short dtype name as reported in type summaries (`Int64`, `Float64`, `String`, ...).
pub fn dtype_name(dtype: &DataType) -> String {
    match dtype {
        DataType::Datetime(_, _) => "Datetime".to_string(),
        DataType::Categorical(_, _) => "Categorical".to_string(),
        other => format!("{other:?}"),
    }
}

// =============================================================================
// Numeric Formatting
// =============================================================================

/// Round to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round_ties_even() / factor;
    // fold -0.0 so labels never read "-0.0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Render a number the way chart labels show it: integral values keep one
/// fractional digit (`1.0`), others use the shortest exact form (`12.35`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Percentage of `part` in `whole`, rounded to two places. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dtypes() {
        assert!(is_numeric_dtype(&DataType::Int32));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(get_dtype_category(&DataType::Time), DtypeCategory::Other);
        assert_eq!(get_dtype_category(&DataType::Boolean), DtypeCategory::Boolean);
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_dtype_name() {
        assert_eq!(dtype_name(&DataType::Int64), "Int64");
        assert_eq!(dtype_name(&DataType::String), "String");
        assert_eq!(
            dtype_name(&DataType::Datetime(TimeUnit::Milliseconds, None)),
            "Datetime"
        );
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(97.25, 1), 97.2);
        assert_eq!(round_to(8.375, 2), 8.38);
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(-0.001, 2), 0.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(12.35), "12.35");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 4), 50.0);
        // 3.125 is a tie and goes to the even digit
        assert_eq!(percentage(1, 32), 3.12);
        assert_eq!(percentage(3, 0), 0.0);
    }
}
