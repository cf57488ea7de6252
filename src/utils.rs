use lazy_static::lazy_static;
use regex::Regex;

use crate::entity::{is_valid_rate, BotError, Category};
use crate::expression::{self, CommaMode};

lazy_static! {
    static ref AMOUNT_RE: Regex = Regex::new(r"^[+-]?(\d+([.,]\d*)?|[.,]\d+)$").unwrap();
}

// Parse a plain decimal number typed by the operator; `,` may be used as the decimal separator
pub fn parse_amount(input: &str) -> Result<f64, BotError> {
    let trimmed = input.trim();

    if !AMOUNT_RE.is_match(trimmed) {
        return Err(BotError::InvalidAmount(format!("'{}' is not a number", trimmed)));
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| BotError::InvalidAmount(format!("'{}' is not a number", trimmed)))
}

// Lot prices may be zero but never negative
pub fn parse_price(input: &str) -> Result<f64, BotError> {
    let price = parse_amount(input)?;
    if price < 0.0 {
        return Err(BotError::InvalidAmount("price cannot be negative".to_string()));
    }
    Ok(price)
}

// Rate inputs and transaction amounts must be strictly positive
pub fn parse_rate_value(input: &str) -> Result<f64, BotError> {
    let value = parse_amount(input)?;
    if !is_valid_rate(value) {
        return Err(BotError::InvalidAmount(
            "value must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

// Evaluate an action price expression with the category's comma convention
pub fn parse_action_price(input: &str, category: Category) -> Result<f64, BotError> {
    let comma = if category.descriptor().comma_is_plus {
        CommaMode::Plus
    } else {
        CommaMode::DecimalPoint
    };

    let price = expression::evaluate(input, comma)?;
    if price < 0.0 {
        return Err(BotError::InvalidAmount(
            "action price cannot be negative".to_string(),
        ));
    }
    Ok(price)
}

// Format a signed delta, always showing the sign
pub fn format_signed(value: f64) -> String {
    format!("{:+.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!(parse_amount("1000").unwrap(), 1000.0);
        assert_eq!(parse_amount(" 12.75 ").unwrap(), 12.75);
        assert_eq!(parse_amount("0,5").unwrap(), 0.5);
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("1e3").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("10+5").is_err());
    }

    #[test]
    fn rate_values_must_be_positive() {
        assert!(parse_rate_value("0").is_err());
        assert!(parse_rate_value("-3").is_err());
        assert_eq!(parse_rate_value("96.5").unwrap(), 96.5);
    }

    #[test]
    fn prices_must_not_be_negative() {
        assert!(parse_price("-1").is_err());
        assert_eq!(parse_price("0").unwrap(), 0.0);
    }

    #[test]
    fn action_price_comma_follows_category() {
        assert_eq!(parse_action_price("10,5", Category::BrawlStars).unwrap(), 10.5);
        assert_eq!(parse_action_price("10,5", Category::Telegram).unwrap(), 15.0);
        assert!(parse_action_price("5-10", Category::ClashRoyale).is_err());
        assert!(matches!(
            parse_action_price("1/0", Category::ClashRoyale),
            Err(BotError::InvalidExpression(_))
        ));
    }

    #[test]
    fn signed_format_shows_plus() {
        assert_eq!(format_signed(12.3456), "+12.35");
        assert_eq!(format_signed(-3.0), "-3.00");
        assert_eq!(format_signed(0.0), "+0.00");
    }
}
