use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::CalcArgs;

pub mod formatters;

#[derive(Parser)]
#[command(name = "feecalc")]
#[command(version, about = "Pro-rated annualized fee calculator")]
#[command(
    long_about = "Compute a pro-rated annualized fee from an amount, an annual rate and a billing window, and print the two tab-delimited UDA rows for the back-office upload template."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a config file (default: <config dir>/feecalc/config.toml)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a fee and print the UDA rows
    Calc(CalcCommand),

    /// Launch an interactive session with a ledger of retained fees
    Interactive,
}

#[derive(Args, Debug, Clone)]
pub struct CalcCommand {
    /// Principal amount; `,` separators allowed, negative for withdrawals
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,

    /// Annual rate as a fraction (0.0012 = 0.12%)
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: String,

    /// Supplemental bill date (MM/DD/YYYY)
    #[arg(short, long = "bill-date")]
    pub bill_date: String,

    /// Quarter end date (MM/DD/YYYY); defaults to the end of the current quarter
    #[arg(short, long = "end-date")]
    pub end_date: Option<String>,

    /// Custodian #/Port ID
    #[arg(short, long, default_value = "")]
    pub custodian: String,

    /// Exclude flag
    #[arg(short = 'x', long, default_value = "")]
    pub exclude: String,

    /// COM code
    #[arg(long, default_value = "")]
    pub com: String,

    /// Comment for the manual fee credit row (replaces the generated note)
    #[arg(long)]
    pub comment: Option<String>,

    /// Print only the two tab-delimited rows
    #[arg(long)]
    pub rows_only: bool,
}

impl From<CalcCommand> for CalcArgs {
    fn from(c: CalcCommand) -> Self {
        CalcArgs {
            amount: c.amount,
            rate: c.rate,
            bill_date: c.bill_date,
            end_date: c.end_date,
            custodian: c.custodian,
            exclude: c.exclude,
            com: c.com,
            comment: c.comment,
        }
    }
}
