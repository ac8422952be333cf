//! Exact decimal text conversion.
//!
//! Uses `rust_decimal` so prices and commissions never pass through
//! binary floating point. The textual form keeps the value's scale:
//! `125.50` is rendered as `125.50`, not `125.5`.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;

/// Render a decimal as its exact string form.
///
/// `rust_decimal` never emits exponent notation, so the output is always
/// plain decimal text at the value's own scale.
#[inline]
pub fn render_decimal(value: &Decimal) -> String {
    value.to_string()
}

/// Parse decimal text without rounding.
///
/// Text must fit exactly; anything that would need rounding to fit the
/// 96-bit mantissa or 28 fractional digits is rejected instead of silently
/// truncated. Exponent notation (`1.5E+3`) is accepted under the same rule.
pub fn parse_decimal(text: &str) -> CoreResult<Decimal> {
    let invalid = || CoreError::InvalidDecimal(text.to_string());

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed != text {
        return Err(invalid());
    }

    if let Some(at) = trimmed.find(|c: char| c == 'e' || c == 'E') {
        // from_scientific rounds an over-long mantissa; it has to fit as-is.
        Decimal::from_str_exact(&trimmed[..at]).map_err(|_| invalid())?;
        return Decimal::from_scientific(trimmed).map_err(|_| invalid());
    }

    Decimal::from_str_exact(trimmed).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_keeps_scale() {
        assert_eq!(render_decimal(&dec!(125.50)), "125.50");
        assert_eq!(render_decimal(&dec!(128.00)), "128.00");
        assert_eq!(render_decimal(&dec!(-0.001)), "-0.001");
    }

    #[test]
    fn test_parse_is_exact() {
        let parsed = parse_decimal("19.99").unwrap();
        assert_eq!(parsed, dec!(19.99));
        assert_eq!(parsed.to_string(), "19.99");
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_decimal("1.5E+3").unwrap(), dec!(1500));
        assert_eq!(parse_decimal("25e-2").unwrap(), dec!(0.25));
    }

    #[test]
    fn test_parse_scientific_rejects_rounding() {
        assert!(parse_decimal("1.2345678901234567890123456789012e0").is_err());
        assert!(parse_decimal("1.2345678901234567890123456789012E+2").is_err());
        assert!(parse_decimal("1e-29").is_err());
        assert!(parse_decimal("1e29").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_text() {
        // One past Decimal::MAX.
        assert!(parse_decimal("79228162514264337593543950336").is_err());
        // 29 fractional digits.
        assert!(parse_decimal("0.12345678901234567890123456789").is_err());
        assert_eq!(
            parse_decimal("79228162514264337593543950335").unwrap(),
            Decimal::MAX
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal(" 1.0").is_err());
        assert!(parse_decimal("1.0.0").is_err());
    }
}
