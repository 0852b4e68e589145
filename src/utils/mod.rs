//! Utility functions for formatting money values
//!
//! All money shown to the operator or written into export rows goes through
//! here so that rounding and separators stay consistent.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$" prefix (US Dollar)
    USD,
    /// No currency symbol (export row cells)
    None,
}

/// Round a value to cents, half away from zero.
///
/// This is the only place rounding happens; calculations keep full precision.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value using US conventions:
/// - Thousands separator: `,`
/// - Decimal separator: `.`
/// - Negative sign before the currency symbol: `-$1,234.56`
///
/// # Examples
/// ```
/// use feecalc::utils::{format_money_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_money_with_width(dec!(1234.56), 0, CurrencySymbol::USD),
///     "$1,234.56"
/// );
///
/// assert_eq!(
///     format_money_with_width(dec!(1234), 12, CurrencySymbol::None),
///     "    1,234.00"
/// );
/// ```
pub fn format_money_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = round_cents(value);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (,) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::USD => "$",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{}.{}", sign, prefix, with_separators, decimal_part);

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as US dollars with symbol: "$1,234.56"
///
/// # Examples
/// ```
/// use feecalc::utils::format_usd;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_usd(dec!(1234.56)), "$1,234.56");
/// assert_eq!(format_usd(dec!(-500)), "-$500.00");
/// ```
pub fn format_usd(value: Decimal) -> String {
    format_money_with_width(value, 0, CurrencySymbol::USD)
}

/// Format number only (no symbol): "1,234.56"
///
/// # Examples
/// ```
/// use feecalc::utils::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1000000)), "1,000,000.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    format_money_with_width(value, 0, CurrencySymbol::None)
}
