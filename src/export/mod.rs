//! UDA export rows
//!
//! Two fixed column layouts pasted into the back-office upload template.
//! Column order is a contract with that template; changing it breaks uploads.
//!
//! Transaction row (16 columns):
//!
//! | # | value |
//! |---|-------|
//! | 1 | `I` |
//! | 2 | `1` |
//! | 3 | exclude flag |
//! | 4 | COM code |
//! | 5 | blank |
//! | 6 | bill date `M/D/YYYY` |
//! | 7 | `Billing` |
//! | 8 | `PI` |
//! | 9 | custodian id |
//! | 10 | `Asset` |
//! | 11 | blank |
//! | 12 | `Cash` |
//! | 13 | `CD` or `CW Minus 1` |
//! | 14 | `1` |
//! | 15 | `USD` |
//! | 16 | \|amount\| `1,234.56` |
//!
//! Manual fee credit row (20 columns): `I`, blank, period end `M/D/YYYY`,
//! `Billing`, `PI`, custodian id, `Manual Fee Credit`, `CASH`, `USD`,
//! fee `1,234.56`, nine blanks, comment.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::engine::FeeQuote;
use crate::error::Result;
use crate::utils::format_amount;

pub const TRANSACTION_ROW_COLUMNS: usize = 16;
pub const CREDIT_ROW_COLUMNS: usize = 20;

const CREDIT_BLANK_COLUMNS: usize = 9;

/// One template row, columns in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportRow(Vec<String>);

impl ExportRow {
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as a single tab-separated line without a trailing newline.
    pub fn to_tsv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(&self.0)?;
        let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let line = String::from_utf8(bytes)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// `M/D/YYYY` without zero padding, as the template expects.
fn template_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Transaction cash-flow row for the bill date.
pub fn transaction_row(quote: &FeeQuote) -> ExportRow {
    let input = &quote.input;
    let fields = &input.fields;

    ExportRow(vec![
        "I".to_string(),
        "1".to_string(),
        fields.exclude.clone(),
        fields.com.clone(),
        String::new(),
        template_date(input.bill_date),
        "Billing".to_string(),
        "PI".to_string(),
        fields.custodian_id.clone(),
        "Asset".to_string(),
        String::new(),
        "Cash".to_string(),
        quote.transaction_type().code().to_string(),
        "1".to_string(),
        "USD".to_string(),
        format_amount(input.amount.abs()),
    ])
}

/// Manual fee credit row dated at the period end.
pub fn credit_row(quote: &FeeQuote) -> ExportRow {
    let input = &quote.input;

    let mut columns = vec![
        "I".to_string(),
        String::new(),
        template_date(input.period_end),
        "Billing".to_string(),
        "PI".to_string(),
        input.fields.custodian_id.clone(),
        "Manual Fee Credit".to_string(),
        "CASH".to_string(),
        "USD".to_string(),
        format_amount(quote.result.fee),
    ];
    columns.extend(std::iter::repeat(String::new()).take(CREDIT_BLANK_COLUMNS));
    columns.push(quote.comment());

    ExportRow(columns)
}

/// Both rows of a quote, transaction row first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRows {
    pub transaction: ExportRow,
    pub credit: ExportRow,
}

impl ExportRows {
    pub fn for_quote(quote: &FeeQuote) -> Self {
        Self {
            transaction: transaction_row(quote),
            credit: credit_row(quote),
        }
    }
}
