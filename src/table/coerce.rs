//! Cell-value coercion.
//!
//! Statistical exports mix plain numbers, a reserved missing-value token, and
//! values with trailing annotation flags (`"12.3 b"`, `"45 e"`). Coercion is
//! permissive: anything that is neither the missing token nor prefixed by a
//! number degrades to `Missing` instead of raising, so unexpected upstream
//! formatting never aborts the whole table.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Value;

/// The reserved missing-observation token as rendered in cells.
///
/// Comparison happens after trimming, so `":"`, `": "` and padded variants
/// all count as missing.
pub const MISSING_TOKEN: &str = ": ";

/// Longest leading substring of an optional sign, digits, and an optional
/// decimal fraction.
static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?").expect("numeric prefix pattern"));

/// Coerce a raw cell into a numeric value or an explicit gap. Never fails.
pub fn coerce(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == MISSING_TOKEN.trim() {
        return Value::Missing;
    }
    match NUMERIC_PREFIX.find(trimmed) {
        Some(m) => match m.as_str().parse::<f64>() {
            Ok(v) => Value::Number(v),
            Err(_) => Value::Missing,
        },
        None => Value::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_variants() {
        assert_eq!(coerce(": "), Value::Missing);
        assert_eq!(coerce(":"), Value::Missing);
        assert_eq!(coerce("  :  "), Value::Missing);
        assert_eq!(coerce(""), Value::Missing);
        assert_eq!(coerce("   "), Value::Missing);
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(coerce("87"), Value::Number(87.0));
        assert_eq!(coerce("23.9"), Value::Number(23.9));
        assert_eq!(coerce("-4.5"), Value::Number(-4.5));
        assert_eq!(coerce(" 60.1 "), Value::Number(60.1));
    }

    #[test]
    fn flagged_values_use_numeric_prefix() {
        assert_eq!(coerce("12.3 b"), Value::Number(12.3));
        assert_eq!(coerce("45 e"), Value::Number(45.0));
        assert_eq!(coerce("7.5bu"), Value::Number(7.5));
    }

    #[test]
    fn garbage_degrades_to_missing() {
        assert_eq!(coerce("n/a"), Value::Missing);
        assert_eq!(coerce("b 12.3"), Value::Missing);
        assert_eq!(coerce("--"), Value::Missing);
        assert_eq!(coerce(": c"), Value::Missing);
    }
}
