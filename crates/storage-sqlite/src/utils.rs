//! Shared helpers for the SQLite storage layer.

use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a decimal amount stored as TEXT.
///
/// The storage layer is the only writer of these columns and always writes
/// `Decimal::to_string()` output, so a parse failure means the column was
/// tampered with. We log and fall back to zero rather than poison every
/// read of the row.
pub(crate) fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(value) => value,
        Err(e) => {
            error!(
                "Failed to parse {} '{}' as a decimal: {}. Falling back to zero.",
                field_name, value_str, e
            );
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_tolerant_valid() {
        assert_eq!(
            parse_decimal_tolerant("19.99", "price"),
            Decimal::new(1999, 2)
        );
        assert_eq!(parse_decimal_tolerant("0", "price"), Decimal::ZERO);
        assert_eq!(parse_decimal_tolerant("-3.5", "tax"), Decimal::new(-35, 1));
    }

    #[test]
    fn test_parse_decimal_tolerant_garbage_falls_back_to_zero() {
        assert_eq!(parse_decimal_tolerant("not a number", "price"), Decimal::ZERO);
        assert_eq!(parse_decimal_tolerant("", "price"), Decimal::ZERO);
    }
}
