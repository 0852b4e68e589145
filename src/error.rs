//! Error handling for feecalc
//!
//! Validation failures are user-facing and carry the exact message shown to
//! the operator. Everything else flows through anyhow for context chaining.

use thiserror::Error;

/// Reasons a fee request is rejected before any calculation happens.
///
/// Variants are listed in the order the checks run; validation stops at the
/// first one that fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount.")]
    InvalidAmount,

    #[error("Please enter a valid rate.")]
    InvalidRate,

    #[error("Rate {rate} exceeds the maximum of {max}. Enter the annual rate as a fraction (e.g. 0.0012 for 0.12%).")]
    RateOutOfRange { rate: String, max: String },

    #[error("Please enter valid dates in MM/DD/YYYY format.")]
    InvalidDates,

    #[error("Supplemental Bill Date must be before Quarter End Date.")]
    DateOrder,

    #[error("Amount and rate are too large to compute a fee.")]
    AmountOverflow,
}

/// Core error types for configuration and session operations
#[derive(Error, Debug)]
pub enum FeeError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("ledger error: {0}")]
    LedgerError(String),
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;
