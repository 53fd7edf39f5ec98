//! # Lenient Parsing
//!
//! Numeric conversion for table-sourced text. Tables contain blanks, dashes
//! and placeholders, so a value that does not parse reads as zero instead of
//! failing the run.

/// Parses an integer, returning 0 for anything that is not one.
///
/// # Examples
///
/// ```
/// use wildsim::parse_int_or_zero;
///
/// assert_eq!(parse_int_or_zero("12"), 12);
/// assert_eq!(parse_int_or_zero("-"), 0);
/// assert_eq!(parse_int_or_zero("3.5"), 0);
/// ```
pub fn parse_int_or_zero(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

/// Parses a decimal, returning 0.0 for anything that is not one.
pub fn parse_decimal_or_zero(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
