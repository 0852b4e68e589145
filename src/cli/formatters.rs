//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of fee calculation from presentation.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::engine::FeeQuote;
use crate::error::Result;
use crate::export::{ExportRow, ExportRows};
use crate::ledger::{Ledger, LedgerEntry};
use crate::utils::{format_usd, round_cents};

/// Fee summary followed by both copyable rows.
pub fn format_quote(quote: &FeeQuote) -> Result<String> {
    let rows = ExportRows::for_quote(quote);
    let mut output = String::new();

    output.push_str(&format!("\n{} Fee Summary\n", "📈".cyan().bold()));
    output.push_str(&format!(
        "  {:<22} {}\n",
        "Days Left in Quarter:".bold(),
        quote.result.days_remaining
    ));
    output.push_str(&format!(
        "  {:<22} {}\n",
        "Calculated Fee:".bold(),
        format_usd(quote.result.fee).green()
    ));

    output.push_str(&format!(
        "\n{}\n",
        "Transaction CashFlow Quick Entry".bold()
    ));
    output.push_str(&rows.transaction.to_tsv()?);
    output.push_str(&format!("\n\n{}\n", "UDA Quick Entry".bold()));
    output.push_str(&rows.credit.to_tsv()?);
    output.push('\n');

    Ok(output)
}

/// Just the two rows, one per line, for piping.
pub fn format_rows(rows: &ExportRows) -> Result<String> {
    Ok(format!(
        "{}\n{}\n",
        rows.transaction.to_tsv()?,
        rows.credit.to_tsv()?
    ))
}

#[derive(Serialize)]
struct JsonQuote<'a> {
    days_remaining: u32,
    fee: String,
    fee_unrounded: String,
    transaction_type: &'a str,
    transaction_row: &'a ExportRow,
    credit_row: &'a ExportRow,
}

/// Format a quote for JSON output
pub fn format_quote_json(quote: &FeeQuote) -> Result<String> {
    let rows = ExportRows::for_quote(quote);
    let payload = JsonQuote {
        days_remaining: quote.result.days_remaining,
        fee: format!("{:.2}", round_cents(quote.result.fee)),
        fee_unrounded: quote.result.fee.to_string(),
        transaction_type: quote.transaction_type().code(),
        transaction_row: &rows.transaction,
        credit_row: &rows.credit,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Format the ledger for JSON output
pub fn format_ledger_json(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string_pretty(ledger.entries())?)
}

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Custodian")]
    custodian: String,
    #[tabled(rename = "Bill Date")]
    bill_date: String,
    #[tabled(rename = "Quarter End")]
    period_end: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Requested")]
    request_date: String,
    #[tabled(rename = "Submitter")]
    submitter: String,
    #[tabled(rename = "BLK")]
    blk: String,
    #[tabled(rename = "Processor")]
    processor: String,
    #[tabled(rename = "Auditor")]
    auditor: String,
    #[tabled(rename = "Audited")]
    audit_date: String,
}

impl LedgerRow {
    fn new(number: usize, entry: &LedgerEntry) -> Self {
        let input = &entry.quote.input;
        let b = &entry.bookkeeping;
        Self {
            number,
            custodian: input.fields.custodian_id.clone(),
            bill_date: input.bill_date.format("%m/%d/%Y").to_string(),
            period_end: input.period_end.format("%m/%d/%Y").to_string(),
            amount: format_usd(input.amount),
            rate: input.rate.normalize().to_string(),
            days: entry.quote.result.days_remaining,
            fee: format_usd(entry.quote.result.fee),
            request_date: b.request_date.clone(),
            submitter: b.submitter.clone(),
            blk: b.blk_number.clone(),
            processor: b.processor.clone(),
            auditor: b.auditor.clone(),
            audit_date: b.audit_date.clone(),
        }
    }
}

/// Format the ledger as a terminal table, numbered from 1.
pub fn format_ledger_table(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return format_empty_ledger();
    }

    let rows: Vec<LedgerRow> = ledger
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| LedgerRow::new(i + 1, entry))
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(4..8), Alignment::right());

    format!(
        "\n{} Ledger ({} entries)\n\n{}\n",
        "📒".cyan().bold(),
        ledger.len(),
        table
    )
}

/// Format empty ledger message
pub fn format_empty_ledger() -> String {
    format!(
        "{} Ledger is empty\nCalculate a fee with {} then keep it with {}\n",
        "ℹ".blue().bold(),
        "calc".bold(),
        "add".bold()
    )
}

pub fn format_help() -> String {
    [
        "Commands:",
        "  calc <amount> <rate> <bill-date> [end-date]  - Calculate fee and print UDA rows",
        "       [--custodian X] [--exclude X] [--com X] [--comment \"...\"]",
        "  add [--submitter X] [--processor X] [--auditor X]",
        "      [--request-date X] [--audit-date X] [--blk X] - Keep the last fee in the ledger",
        "  list                       - Show retained fees",
        "  rows [n]                   - Print UDA rows for entry n (or all)",
        "  delete <n>                 - Delete entry n",
        "  clear                      - Delete all entries",
        "  help                       - Show this help",
        "  exit                       - Exit session",
        "",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeeConfig;
    use crate::engine::{quote_request, DateInput, FeeRequest};
    use crate::ledger::Bookkeeping;

    fn quote() -> FeeQuote {
        let request = FeeRequest {
            amount: "500000".to_string(),
            rate: "0.0012".to_string(),
            bill_date: DateInput::Text("03/04/2025".to_string()),
            period_end: DateInput::Text("03/31/2025".to_string()),
            custodian_id: "ACC42".to_string(),
            ..FeeRequest::default()
        };
        quote_request(&request, &FeeConfig::default()).unwrap()
    }

    #[test]
    fn test_quote_output_contains_summary_and_rows() {
        colored::control::set_override(false);
        let out = format_quote(&quote()).unwrap();
        assert!(out.contains("Days Left in Quarter:"));
        assert!(out.contains("28"));
        assert!(out.contains("$46.03"));
        assert!(out.contains("I\t1\t\t\t\t3/4/2025\tBilling\tPI\tACC42"));
        assert!(out.contains("Manual Fee Credit\tCASH\tUSD\t46.03"));
    }

    #[test]
    fn test_quote_json() {
        let json = format_quote_json(&quote()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["days_remaining"], 28);
        assert_eq!(value["fee"], "46.03");
        assert_eq!(value["transaction_type"], "CD");
        assert_eq!(value["transaction_row"].as_array().unwrap().len(), 16);
        assert_eq!(value["credit_row"].as_array().unwrap().len(), 20);
    }

    #[test]
    fn test_ledger_table() {
        let mut ledger = Ledger::new();
        assert!(format_ledger_table(&ledger).contains("Ledger is empty"));

        let bookkeeping = Bookkeeping {
            submitter: "jdoe".to_string(),
            ..Bookkeeping::default()
        };
        ledger.add(LedgerEntry::new(quote(), bookkeeping));
        let table = format_ledger_table(&ledger);
        assert!(table.contains("ACC42"));
        assert!(table.contains("jdoe"));
        assert!(table.contains("$500,000.00"));
    }

    #[test]
    fn test_help_lists_ledger_commands() {
        let help = format_help();
        for cmd in ["calc", "add", "list", "rows", "delete", "clear"] {
            assert!(help.contains(cmd));
        }
    }
}
