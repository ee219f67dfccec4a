//! Locale-tolerant numeric input.
//!
//! Users type decimals with either a comma or a period ("70,5" / "70.5").

use crate::{Error, Result};

/// Replace the first comma with a period. Nothing else is touched.
pub fn normalize_decimal(input: &str) -> String {
    input.replacen(',', ".", 1)
}

/// Parse a typed decimal field
///
/// Blank, non-numeric and non-finite input all count as a missing field.
pub fn parse_decimal(field: &'static str, input: &str) -> Result<f64> {
    let normalized = normalize_decimal(input.trim());
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::Missing { field }),
    }
}
