//! Fee engine
//!
//! Turns the raw form fields into a validated [`FeeInput`], computes the
//! pro-rated annualized fee and carries everything the export rows need.
//!
//! ```
//! use feecalc::config::FeeConfig;
//! use feecalc::engine::{quote_request, DateInput, FeeRequest};
//! use rust_decimal_macros::dec;
//!
//! let request = FeeRequest {
//!     amount: "500,000".to_string(),
//!     rate: "0.0012".to_string(),
//!     bill_date: DateInput::Text("03/04/2025".to_string()),
//!     period_end: DateInput::Text("03/31/2025".to_string()),
//!     ..FeeRequest::default()
//! };
//! let quote = quote_request(&request, &FeeConfig::default()).unwrap();
//! assert_eq!(quote.result.days_remaining, 28);
//! assert_eq!(quote.result.fee.round_dp(2), dec!(46.03));
//! ```

pub mod daycount;
pub mod fee;
pub mod parse;
pub mod validate;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::FeeConfig;
use crate::error::ValidationError;
use crate::utils::format_usd;

pub use daycount::{days_remaining, quarter_end};
pub use fee::annualized_fee;
pub use parse::{parse_amount, parse_date, parse_rate};
pub use validate::validate;

/// A date as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Free text parsed with the configured date format.
    Text(String),
    /// Already a valid calendar date (date picker, computed default).
    Picked(NaiveDate),
}

impl Default for DateInput {
    fn default() -> Self {
        DateInput::Text(String::new())
    }
}

/// Raw form fields before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeRequest {
    pub amount: String,
    pub rate: String,
    pub bill_date: DateInput,
    pub period_end: DateInput,
    pub custodian_id: String,
    pub exclude: String,
    pub com: String,
    pub comment: Option<String>,
}

/// Identifier fields copied verbatim into both export rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UdaFields {
    pub custodian_id: String,
    pub exclude: String,
    pub com: String,
}

impl UdaFields {
    pub fn new(custodian_id: &str, exclude: &str, com: &str) -> Self {
        Self {
            custodian_id: validate::sanitize(custodian_id),
            exclude: validate::sanitize(exclude),
            com: validate::sanitize(com),
        }
    }
}

/// Validated request. `bill_date <= period_end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeInput {
    pub amount: Decimal,
    pub rate: Decimal,
    pub bill_date: NaiveDate,
    pub period_end: NaiveDate,
    pub fields: UdaFields,
    /// Operator comment; replaces the generated credit note when present.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeResult {
    pub days_remaining: u32,
    /// Unrounded fee; negative for withdrawals.
    pub fee: Decimal,
}

/// Cash movement type written into the transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            TransactionType::Withdrawal
        } else {
            TransactionType::Deposit
        }
    }

    /// Code expected by the upload template.
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "CD",
            TransactionType::Withdrawal => "CW Minus 1",
        }
    }
}

/// A computed fee together with the input it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub input: FeeInput,
    pub result: FeeResult,
}

impl FeeQuote {
    pub fn transaction_type(&self) -> TransactionType {
        TransactionType::from_amount(self.input.amount)
    }

    /// Generated credit note, e.g. `Manual fee due to a deposit of $500,000.00 on 03/04/2025`.
    pub fn generated_note(&self) -> String {
        let amount = format_usd(self.input.amount.abs());
        let date = self.input.bill_date.format("%m/%d/%Y");
        match self.transaction_type() {
            TransactionType::Withdrawal => {
                format!("Manual Credit due to a withdrawal of {} on {}", amount, date)
            }
            TransactionType::Deposit => {
                format!("Manual fee due to a deposit of {} on {}", amount, date)
            }
        }
    }

    /// Comment written in the last credit-row column.
    pub fn comment(&self) -> String {
        self.input
            .comment
            .clone()
            .unwrap_or_else(|| self.generated_note())
    }
}

/// Compute the fee for an already validated input.
pub fn quote(input: FeeInput, config: &FeeConfig) -> Result<FeeQuote, ValidationError> {
    let days = days_remaining(input.bill_date, input.period_end, config.day_count);
    let fee = annualized_fee(input.amount, input.rate, days, config.days_in_year)
        .ok_or(ValidationError::AmountOverflow)?;

    debug!(days, %fee, "fee computed");
    Ok(FeeQuote {
        input,
        result: FeeResult {
            days_remaining: days,
            fee,
        },
    })
}

/// Validate raw fields and compute the fee in one step.
pub fn quote_request(request: &FeeRequest, config: &FeeConfig) -> Result<FeeQuote, ValidationError> {
    let input = validate(request, config)?;
    let quote = quote(input, config)?;
    info!(
        custodian = %quote.input.fields.custodian_id,
        days = quote.result.days_remaining,
        "quote ready"
    );
    Ok(quote)
}
