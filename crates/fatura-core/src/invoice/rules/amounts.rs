//! Amount token conversion.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount token in the bill's `digits,digits` form: comma as
/// the decimal separator, optional leading minus. Thousands separators
/// do not occur in this layout and are not handled.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    Decimal::from_str(&token.replace(',', ".")).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("118,50"), Some(Decimal::from_str("118.50").unwrap()));
        assert_eq!(parse_amount("10,50"), Some(Decimal::from_str("10.50").unwrap()));
        assert_eq!(parse_amount("0,79"), Some(Decimal::from_str("0.79").unwrap()));
    }

    #[test]
    fn test_parse_amount_preserves_sign() {
        assert_eq!(parse_amount("-45,00"), Some(Decimal::from_str("-45.0").unwrap()));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12,34,56"), None);
    }
}
