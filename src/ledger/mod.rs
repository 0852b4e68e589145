//! Session ledger
//!
//! An ordered, in-memory list of quotes the operator chose to keep. Entries
//! are only ever appended, removed by position, or cleared together.

use serde::Serialize;
use tracing::{info, warn};

use crate::engine::FeeQuote;
use crate::export::ExportRows;

/// Who asked for, entered and checked a retained quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bookkeeping {
    pub request_date: String,
    pub submitter: String,
    pub blk_number: String,
    pub processor: String,
    pub auditor: String,
    pub audit_date: String,
}

/// A quote retained by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub quote: FeeQuote,
    pub bookkeeping: Bookkeeping,
}

impl LedgerEntry {
    pub fn new(quote: FeeQuote, bookkeeping: Bookkeeping) -> Self {
        Self { quote, bookkeeping }
    }

    pub fn rows(&self) -> ExportRows {
        ExportRows::for_quote(&self.quote)
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it. Duplicates are kept.
    pub fn add(&mut self, entry: LedgerEntry) -> &LedgerEntry {
        let index = self.entries.len();
        self.entries.push(entry);
        info!(count = index + 1, "ledger entry added");
        &self.entries[index]
    }

    /// Remove the entry at `index` (0-based).
    ///
    /// Returns `None` and leaves the ledger untouched when out of range.
    pub fn delete(&mut self, index: usize) -> Option<LedgerEntry> {
        if index >= self.entries.len() {
            warn!(index, count = self.entries.len(), "ledger delete out of range");
            return None;
        }
        let removed = self.entries.remove(index);
        info!(index, count = self.entries.len(), "ledger entry deleted");
        Some(removed)
    }

    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        info!(count, "ledger cleared");
    }

    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
