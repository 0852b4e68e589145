//! Annualized fee arithmetic.

use rust_decimal::Decimal;

/// `amount * rate * (days / days_in_year)`, unrounded.
///
/// Returns `None` when the product does not fit in a `Decimal` or
/// `days_in_year` is zero.
pub fn annualized_fee(amount: Decimal, rate: Decimal, days: u32, days_in_year: u32) -> Option<Decimal> {
    let fraction = Decimal::from(days).checked_div(Decimal::from(days_in_year))?;
    amount.checked_mul(rate)?.checked_mul(fraction)
}
