//! Ordered validation of a raw fee request.
//!
//! Checks run amount → rate → dates → date order and stop at the first
//! failure, so the operator only ever sees one message at a time.

use chrono::NaiveDate;
use tracing::debug;

use super::parse::{parse_amount, parse_date, parse_rate};
use super::{DateInput, FeeInput, FeeRequest, UdaFields};
use crate::config::FeeConfig;
use crate::error::ValidationError;

/// Turn raw form text into a typed [`FeeInput`].
pub fn validate(request: &FeeRequest, config: &FeeConfig) -> Result<FeeInput, ValidationError> {
    let amount = parse_amount(&request.amount).ok_or(ValidationError::InvalidAmount)?;

    let rate = parse_rate(&request.rate, config.rate.policy).ok_or(ValidationError::InvalidRate)?;
    if let Some(max) = config.rate.max {
        if rate > max {
            return Err(ValidationError::RateOutOfRange {
                rate: rate.to_string(),
                max: max.normalize().to_string(),
            });
        }
    }

    let bill_date = resolve_date(&request.bill_date, &config.date_format);
    let period_end = resolve_date(&request.period_end, &config.date_format);
    let (Some(bill_date), Some(period_end)) = (bill_date, period_end) else {
        return Err(ValidationError::InvalidDates);
    };

    if bill_date > period_end {
        debug!(%bill_date, %period_end, "bill date after period end");
        return Err(ValidationError::DateOrder);
    }

    let comment = request
        .comment
        .as_deref()
        .map(sanitize)
        .filter(|c| !c.trim().is_empty());

    Ok(FeeInput {
        amount,
        rate,
        bill_date,
        period_end,
        fields: UdaFields::new(&request.custodian_id, &request.exclude, &request.com),
        comment,
    })
}

/// Picked dates are already valid; text goes through the configured pattern.
fn resolve_date(input: &DateInput, format: &str) -> Option<NaiveDate> {
    match input {
        DateInput::Picked(date) => Some(*date),
        DateInput::Text(text) => parse_date(text, format),
    }
}

/// Tabs and line breaks would shift export columns. Each run of them becomes
/// one space; everything else is kept as typed.
pub(crate) fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.chars() {
        if matches!(c, '\t' | '\r' | '\n') {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}
