//! Command dispatcher that routes parsed session commands to a `FeeSession`
//! and renders the result.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use tracing::info;

use crate::cli::formatters;
use crate::commands::{CalcArgs, Command};
use crate::session::FeeSession;

/// Route a parsed command to its handler.
///
/// Output is returned instead of printed so the REPL and tests share it.
/// `Exit` is handled by the caller and renders nothing here.
pub fn dispatch_command(session: &mut FeeSession, command: Command, json_output: bool) -> Result<String> {
    match command {
        Command::Calc(args) => dispatch_calc(session, args, json_output),
        Command::Add(bookkeeping) => {
            let entry = session.add_last(bookkeeping)?;
            info!(custodian = %entry.quote.input.fields.custodian_id, "fee retained");
            let count = session.ledger().len();
            Ok(format!(
                "{} Added entry #{} to the ledger\n",
                "✓".green().bold(),
                count
            ))
        }
        Command::List => {
            if json_output {
                formatters::format_ledger_json(session.ledger())
            } else {
                Ok(formatters::format_ledger_table(session.ledger()))
            }
        }
        Command::Rows { number } => dispatch_rows(session, number),
        Command::Delete { number } => match number.checked_sub(1).and_then(|i| session.delete(i)) {
            Some(_) => Ok(format!(
                "{} Deleted entry #{} ({} remaining)\n",
                "✓".green().bold(),
                number,
                session.ledger().len()
            )),
            None => Ok(format!(
                "{} No entry #{}; ledger has {} entries\n",
                "ℹ".blue().bold(),
                number,
                session.ledger().len()
            )),
        },
        Command::Clear => {
            session.clear();
            Ok(format!("{} Ledger cleared\n", "✓".green().bold()))
        }
        Command::Help => Ok(formatters::format_help()),
        Command::Exit => Ok(String::new()),
    }
}

fn dispatch_calc(session: &mut FeeSession, args: CalcArgs, json_output: bool) -> Result<String> {
    let request = args.into_request(Local::now().date_naive());
    let quote = session.calculate(&request)?;
    if json_output {
        formatters::format_quote_json(quote)
    } else {
        formatters::format_quote(quote)
    }
}

fn dispatch_rows(session: &FeeSession, number: Option<usize>) -> Result<String> {
    let ledger = session.ledger();
    let selected: Vec<_> = match number {
        Some(n) => match n.checked_sub(1).and_then(|i| ledger.get(i)) {
            Some(entry) => vec![entry],
            None => {
                return Ok(format!(
                    "{} No entry #{}; ledger has {} entries\n",
                    "ℹ".blue().bold(),
                    n,
                    ledger.len()
                ))
            }
        },
        None => ledger.entries().iter().collect(),
    };

    if selected.is_empty() {
        return Ok(formatters::format_empty_ledger());
    }

    let mut output = String::new();
    for entry in selected {
        output.push_str(&formatters::format_rows(&entry.rows())?);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_command;

    fn run(session: &mut FeeSession, line: &str) -> Result<String> {
        dispatch_command(session, parse_command(line).unwrap(), false)
    }

    #[test]
    fn test_calc_add_list_delete_flow() {
        colored::control::set_override(false);
        let mut session = FeeSession::default();

        let out = run(&mut session, "calc 500,000 0.0012 03/04/2025 03/31/2025 -c A1").unwrap();
        assert!(out.contains("$46.03"));

        run(&mut session, "add --submitter jdoe").unwrap();
        run(&mut session, "calc -100,000 0.0012 03/04/2025 03/31/2025 -c B2").unwrap();
        run(&mut session, "add").unwrap();
        assert_eq!(session.ledger().len(), 2);

        let rows = run(&mut session, "rows 2").unwrap();
        assert!(rows.contains("CW Minus 1"));
        assert_eq!(rows.lines().count(), 2);

        let out = run(&mut session, "delete 7").unwrap();
        assert!(out.contains("No entry #7"));
        assert_eq!(session.ledger().len(), 2);

        run(&mut session, "delete 1").unwrap();
        assert_eq!(session.ledger().entries()[0].quote.input.fields.custodian_id, "B2");

        run(&mut session, "clear").unwrap();
        assert!(run(&mut session, "list").unwrap().contains("Ledger is empty"));
    }

    #[test]
    fn test_validation_error_surfaces() {
        let mut session = FeeSession::default();
        let err = run(&mut session, "calc 100 0.01 04/01/2025 03/31/2025").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Supplemental Bill Date must be before Quarter End Date."
        );
    }

    #[test]
    fn test_add_without_calc_fails() {
        let mut session = FeeSession::default();
        assert!(run(&mut session, "add").is_err());
    }
}
