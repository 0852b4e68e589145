//! Session controller
//!
//! One `FeeSession` per operator session. It owns the configuration, the
//! ledger and the most recent successful quote; nothing is shared between
//! sessions.

use tracing::warn;

use crate::config::FeeConfig;
use crate::engine::{quote_request, FeeQuote, FeeRequest};
use crate::error::{FeeError, ValidationError};
use crate::ledger::{Bookkeeping, Ledger, LedgerEntry};

#[derive(Debug, Default)]
pub struct FeeSession {
    config: FeeConfig,
    ledger: Ledger,
    last_quote: Option<FeeQuote>,
}

impl FeeSession {
    pub fn new(config: FeeConfig) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            last_quote: None,
        }
    }

    pub fn config(&self) -> &FeeConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn last_quote(&self) -> Option<&FeeQuote> {
        self.last_quote.as_ref()
    }

    /// Validate and price a request. A rejected request also discards the
    /// previous quote, so `add_last` can only keep what was just shown.
    pub fn calculate(&mut self, request: &FeeRequest) -> Result<&FeeQuote, ValidationError> {
        match quote_request(request, &self.config) {
            Ok(quote) => Ok(&*self.last_quote.insert(quote)),
            Err(e) => {
                warn!(error = %e, "fee request rejected");
                self.last_quote = None;
                Err(e)
            }
        }
    }

    /// Retain the most recent quote in the ledger.
    pub fn add_last(&mut self, bookkeeping: Bookkeeping) -> Result<&LedgerEntry, FeeError> {
        let quote = self.last_quote.clone().ok_or_else(|| {
            FeeError::LedgerError("no calculated fee to add; run calc first".to_string())
        })?;
        Ok(self.ledger.add(LedgerEntry::new(quote, bookkeeping)))
    }

    /// Delete by 0-based index; `None` when out of range.
    pub fn delete(&mut self, index: usize) -> Option<LedgerEntry> {
        self.ledger.delete(index)
    }

    pub fn clear(&mut self) {
        self.ledger.clear();
    }
}
