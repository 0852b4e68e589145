use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feecalc::cli::{formatters, Cli, Commands};
use feecalc::commands::CalcArgs;
use feecalc::config::FeeConfig;
use feecalc::engine::quote_request;
use feecalc::export::ExportRows;
use feecalc::session::FeeSession;
use feecalc::ui;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = FeeConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Calc(calc)) => {
            let rows_only = calc.rows_only;
            let request = CalcArgs::from(calc).into_request(Local::now().date_naive());
            let quote = quote_request(&request, &config)?;

            let output = if cli.json {
                format!("{}\n", formatters::format_quote_json(&quote)?)
            } else if rows_only {
                formatters::format_rows(&ExportRows::for_quote(&quote))?
            } else {
                formatters::format_quote(&quote)?
            };
            print!("{}", output);
            Ok(())
        }
        Some(Commands::Interactive) | None => ui::launch_session(FeeSession::new(config), cli.json),
    }
}

/// Logs go to stderr so stdout stays copy-paste clean.
fn init_logging() {
    let filter = EnvFilter::try_from_env("FEECALC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
