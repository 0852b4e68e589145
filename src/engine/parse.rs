//! Input parsing for the fee form fields.
//!
//! Parsers never fail loudly: malformed text yields `None` and the
//! validation step turns that into the matching user-facing message.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::config::RatePolicy;

/// Thousands separator accepted in amounts.
const THOUSANDS_SEPARATOR: char = ',';

/// Optional sign, then digits with at most one dot. No exponent.
static SIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").expect("valid regex"));

/// Digits with at most one dot.
static UNSIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)$").expect("valid regex"));

/// Parse a money amount such as `1,000,000` or `-2500.50`.
///
/// Every `,` is removed before parsing, so `1,0,0` reads as `100`.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    if !SIGNED_DECIMAL.is_match(&cleaned) {
        return None;
    }
    decimal_from_literal(&cleaned)
}

/// Parse an annual rate expressed as a fraction, e.g. `0.0012`.
///
/// | policy   | accepts            | rejects                  |
/// |----------|--------------------|--------------------------|
/// | `Strict` | `0.0012` `.5` `1.` | `-0.1` `+0.1` `1e-3` `1,0` |
/// | `Signed` | strict, plus `-0.1` `+0.1` | `1e-3` `1,0`     |
pub fn parse_rate(text: &str, policy: RatePolicy) -> Option<Decimal> {
    let text = text.trim();
    let grammar = match policy {
        RatePolicy::Strict => &*UNSIGNED_DECIMAL,
        RatePolicy::Signed => &*SIGNED_DECIMAL,
    };

    if !grammar.is_match(text) {
        return None;
    }
    decimal_from_literal(text)
}

/// Years outside this range only come from a mistyped year field.
const FOUR_DIGIT_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Parse a calendar date with a chrono format string.
///
/// With the default `%m/%d/%Y` both `03/04/2025` and `3/4/2025` are accepted.
/// chrono's `%Y` takes any number of digits, so `3/4/25` would read as year
/// 25; years must have four digits.
pub fn parse_date(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), format)
        .ok()
        .filter(|date| FOUR_DIGIT_YEARS.contains(&date.year()))
}

/// Decimal's parser rejects a bare leading `+` and some dot placements the
/// grammar allows, so normalize them first.
fn decimal_from_literal(literal: &str) -> Option<Decimal> {
    let (negative, digits) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    let digits = digits.strip_suffix('.').unwrap_or(digits);
    let normalized = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FMT: &str = "%m/%d/%Y";

    #[test]
    fn test_amount_with_thousands_separators() {
        assert_eq!(parse_amount("1,000,000"), Some(dec!(1000000)));
        assert_eq!(parse_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount(" 500000 "), Some(dec!(500000)));
    }

    #[test]
    fn test_amount_sign() {
        assert_eq!(parse_amount("-100,000"), Some(dec!(-100000)));
        assert_eq!(parse_amount("+25"), Some(dec!(25)));
    }

    #[test]
    fn test_amount_dot_placement() {
        assert_eq!(parse_amount(".5"), Some(dec!(0.5)));
        assert_eq!(parse_amount("5."), Some(dec!(5)));
        assert_eq!(parse_amount("-.25"), Some(dec!(-0.25)));
    }

    #[test]
    fn test_amount_invalid() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("$100"), None);
        assert_eq!(parse_amount("1e5"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("--1"), None);
    }

    #[test]
    fn test_rate_strict() {
        assert_eq!(parse_rate("0.0012", RatePolicy::Strict), Some(dec!(0.0012)));
        assert_eq!(parse_rate(".01", RatePolicy::Strict), Some(dec!(0.01)));
        assert_eq!(parse_rate("1", RatePolicy::Strict), Some(dec!(1)));
        assert_eq!(parse_rate("-0.01", RatePolicy::Strict), None);
        assert_eq!(parse_rate("+0.01", RatePolicy::Strict), None);
        assert_eq!(parse_rate("1e-3", RatePolicy::Strict), None);
        assert_eq!(parse_rate("0,01", RatePolicy::Strict), None);
        assert_eq!(parse_rate("", RatePolicy::Strict), None);
    }

    #[test]
    fn test_rate_signed() {
        assert_eq!(parse_rate("-0.01", RatePolicy::Signed), Some(dec!(-0.01)));
        assert_eq!(parse_rate("+0.01", RatePolicy::Signed), Some(dec!(0.01)));
        assert_eq!(parse_rate("1e-3", RatePolicy::Signed), None);
    }

    #[test]
    fn test_date_padded_and_unpadded() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 4);
        assert_eq!(parse_date("03/04/2025", FMT), expected);
        assert_eq!(parse_date("3/4/2025", FMT), expected);
    }

    #[test]
    fn test_date_invalid() {
        assert_eq!(parse_date("", FMT), None);
        assert_eq!(parse_date("2025-03-04", FMT), None);
        assert_eq!(parse_date("02/30/2025", FMT), None);
        assert_eq!(parse_date("13/01/2025", FMT), None);
    }

    #[test]
    fn test_date_short_year_rejected() {
        assert_eq!(parse_date("3/4/25", FMT), None);
        assert_eq!(parse_date("03/04/025", FMT), None);
        assert_eq!(parse_date("3/4/0025", FMT), None);
        assert_eq!(parse_date("3/4/20250", FMT), None);
    }

    #[test]
    fn test_date_custom_format() {
        assert_eq!(
            parse_date("2025-06-30", "%Y-%m-%d"),
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );
    }
}
