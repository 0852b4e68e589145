//! Command parsing for the interactive session
//!
//! A small hand-written grammar for REPL lines. The one-shot CLI uses clap
//! and converts into the same [`CalcArgs`], so both surfaces build requests
//! identically.

use chrono::NaiveDate;

use crate::engine::{quarter_end, DateInput, FeeRequest};
use crate::ledger::Bookkeeping;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `calc <amount> <rate> <bill-date> [end-date] [--custodian X] [--exclude X] [--com X] [--comment X]`
    Calc(CalcArgs),
    /// `add [--submitter X] [--processor X] [--auditor X] [--request-date X] [--audit-date X] [--blk X]`
    Add(Bookkeeping),
    /// `list`
    List,
    /// `rows [n]`, 1-based
    Rows { number: Option<usize> },
    /// `delete <n>`, 1-based
    Delete { number: usize },
    /// `clear`
    Clear,
    Help,
    Exit,
}

/// Text fields of a fee calculation as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalcArgs {
    pub amount: String,
    pub rate: String,
    pub bill_date: String,
    /// Defaults to the end of the quarter containing today.
    pub end_date: Option<String>,
    pub custodian: String,
    pub exclude: String,
    pub com: String,
    pub comment: Option<String>,
}

impl CalcArgs {
    /// Build an engine request; `today` supplies the default period end.
    pub fn into_request(self, today: NaiveDate) -> FeeRequest {
        let period_end = match self.end_date {
            Some(text) => DateInput::Text(text),
            None => DateInput::Picked(quarter_end(today)),
        };
        FeeRequest {
            amount: self.amount,
            rate: self.rate,
            bill_date: DateInput::Text(self.bill_date),
            period_end,
            custodian_id: self.custodian,
            exclude: self.exclude,
            com: self.com,
            comment: self.comment,
        }
    }
}

/// Error type for command parsing
#[derive(Debug, Clone)]
pub struct CommandParseError {
    pub message: String,
}

impl CommandParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandParseError {}

/// Split a line on whitespace, keeping `"quoted text"` together.
pub fn tokenize(input: &str) -> Result<Vec<String>, CommandParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandParseError::new("Unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse a command string into a Command enum
///
/// A leading slash is accepted: `/calc ...` and `calc ...` are equivalent.
pub fn parse_command(input: &str) -> Result<Command, CommandParseError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(CommandParseError::new(
            "Empty command. Type `/help` for commands.",
        ));
    }

    let input = input.strip_prefix('/').unwrap_or(input);
    let tokens = tokenize(input)?;
    let (cmd, rest) = tokens
        .split_first()
        .ok_or_else(|| CommandParseError::new("No command provided"))?;

    match cmd.to_lowercase().as_str() {
        "calc" => parse_calc(rest).map(Command::Calc),
        "add" => parse_add(rest).map(Command::Add),
        "list" | "ledger" => Ok(Command::List),
        "rows" => {
            let number = rest.first().map(|n| parse_entry_number(n)).transpose()?;
            Ok(Command::Rows { number })
        }
        "delete" | "del" => {
            let n = rest.first().ok_or_else(|| {
                CommandParseError::new("delete requires an entry number. Usage: delete <n>")
            })?;
            Ok(Command::Delete {
                number: parse_entry_number(n)?,
            })
        }
        "clear" => Ok(Command::Clear),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(CommandParseError::new(format!(
            "Unknown command '{}'. Type `/help` for commands.",
            other
        ))),
    }
}

fn parse_entry_number(text: &str) -> Result<usize, CommandParseError> {
    text.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CommandParseError::new(format!("Invalid entry number '{}'", text)))
}

/// Options are `--name value` pairs; `-c` and `-x` are short for custodian/exclude.
fn is_option(token: &str) -> bool {
    token.starts_with("--") || token == "-c" || token == "-x"
}

fn parse_calc(args: &[String]) -> Result<CalcArgs, CommandParseError> {
    const USAGE: &str =
        "Usage: calc <amount> <rate> <bill-date> [end-date] [--custodian X] [--exclude X] [--com X] [--comment X]";

    let mut calc = CalcArgs::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let token = args[i].as_str();
        if !is_option(token) {
            positional.push(args[i].clone());
            i += 1;
            continue;
        }

        let value = args
            .get(i + 1)
            .cloned()
            .ok_or_else(|| CommandParseError::new(format!("{} requires a value", token)))?;
        match token {
            "--custodian" | "-c" => calc.custodian = value,
            "--exclude" | "-x" => calc.exclude = value,
            "--com" => calc.com = value,
            "--comment" => calc.comment = Some(value),
            "--end" | "--end-date" => calc.end_date = Some(value),
            other => {
                return Err(CommandParseError::new(format!(
                    "Unknown option '{}'. {}",
                    other, USAGE
                )))
            }
        }
        i += 2;
    }

    let mut positional = positional.into_iter();
    let missing = || CommandParseError::new(format!("calc requires amount, rate and bill date. {}", USAGE));
    calc.amount = positional.next().ok_or_else(missing)?;
    calc.rate = positional.next().ok_or_else(missing)?;
    calc.bill_date = positional.next().ok_or_else(missing)?;
    if let Some(end) = positional.next() {
        calc.end_date = Some(end);
    }
    if positional.next().is_some() {
        return Err(CommandParseError::new(format!("Too many arguments. {}", USAGE)));
    }

    Ok(calc)
}

fn parse_add(args: &[String]) -> Result<Bookkeeping, CommandParseError> {
    let mut bookkeeping = Bookkeeping::default();

    for pair in args.chunks(2) {
        let [flag, value] = pair else {
            return Err(CommandParseError::new(format!("{} requires a value", pair[0])));
        };
        let value = value.clone();
        match flag.as_str() {
            "--submitter" => bookkeeping.submitter = value,
            "--processor" => bookkeeping.processor = value,
            "--auditor" => bookkeeping.auditor = value,
            "--request-date" => bookkeeping.request_date = value,
            "--audit-date" => bookkeeping.audit_date = value,
            "--blk" => bookkeeping.blk_number = value,
            other => {
                return Err(CommandParseError::new(format!(
                    "Unknown option '{}'. Usage: add [--submitter X] [--processor X] [--auditor X] [--request-date X] [--audit-date X] [--blk X]",
                    other
                )))
            }
        }
    }

    Ok(bookkeeping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"calc 1,000 0.01 3/4/2025 --comment "late wire fix""#).unwrap(),
            vec!["calc", "1,000", "0.01", "3/4/2025", "--comment", "late wire fix"]
        );
        assert_eq!(tokenize(r#"--exclude """#).unwrap(), vec!["--exclude", ""]);
        assert!(tokenize(r#"calc "open"#).is_err());
    }

    #[test]
    fn test_parse_calc_full() {
        let cmd = parse_command(
            "/calc -100,000 0.0012 03/04/2025 03/31/2025 --custodian 123 -x Y --com C9",
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::Calc(CalcArgs {
                amount: "-100,000".to_string(),
                rate: "0.0012".to_string(),
                bill_date: "03/04/2025".to_string(),
                end_date: Some("03/31/2025".to_string()),
                custodian: "123".to_string(),
                exclude: "Y".to_string(),
                com: "C9".to_string(),
                comment: None,
            })
        );
    }

    #[test]
    fn test_parse_calc_missing_fields() {
        let err = parse_command("calc 100 0.01").unwrap_err();
        assert!(err.message.contains("requires amount, rate and bill date"));
    }

    #[test]
    fn test_parse_calc_unknown_option() {
        let err = parse_command("calc 100 0.01 3/4/2025 --bogus 1").unwrap_err();
        assert!(err.message.contains("Unknown option '--bogus'"));
    }

    #[test]
    fn test_default_end_is_quarter_end() {
        let Command::Calc(args) = parse_command("calc 100 0.01 5/2/2025").unwrap() else {
            panic!("expected calc");
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let request = args.into_request(today);
        assert_eq!(
            request.period_end,
            DateInput::Picked(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
    }

    #[test]
    fn test_parse_add() {
        let cmd = parse_command("add --submitter jdoe --blk 42 --auditor \"A. Smith\"").unwrap();
        let Command::Add(b) = cmd else {
            panic!("expected add");
        };
        assert_eq!(b.submitter, "jdoe");
        assert_eq!(b.blk_number, "42");
        assert_eq!(b.auditor, "A. Smith");
        assert!(parse_command("add --submitter").is_err());
    }

    #[test]
    fn test_parse_ledger_commands() {
        assert_eq!(parse_command("list").unwrap(), Command::List);
        assert_eq!(parse_command("rows").unwrap(), Command::Rows { number: None });
        assert_eq!(parse_command("rows 2").unwrap(), Command::Rows { number: Some(2) });
        assert_eq!(parse_command("delete 3").unwrap(), Command::Delete { number: 3 });
        assert_eq!(parse_command("CLEAR").unwrap(), Command::Clear);
        assert!(parse_command("delete 0").is_err());
        assert!(parse_command("delete").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("/help").unwrap(), Command::Help);
        assert_eq!(parse_command("quit").unwrap(), Command::Exit);
        assert!(parse_command("   ").is_err());
        assert!(parse_command("portfolio").is_err());
    }
}
