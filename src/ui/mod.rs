//! Interactive session REPL.
//!
//! One `FeeSession` lives for the duration of the loop; its ledger is
//! dropped when the operator exits.

pub mod readline;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;

use crate::commands::{parse_command, Command};
use crate::dispatcher::dispatch_command;
use crate::session::FeeSession;
use readline::CommandSpec;

const COMMANDS: &[CommandSpec] = &[
    (
        "calc",
        &["--custodian", "--exclude", "--com", "--comment", "--end-date"],
    ),
    (
        "add",
        &[
            "--submitter",
            "--processor",
            "--auditor",
            "--request-date",
            "--audit-date",
            "--blk",
        ],
    ),
    ("list", &[]),
    ("rows", &[]),
    ("delete", &[]),
    ("clear", &[]),
    ("help", &[]),
    ("exit", &[]),
    ("quit", &[]),
];

/// Launch the interactive REPL.
pub fn launch_session(mut session: FeeSession, json_output: bool) -> Result<()> {
    println!("{}", "Fee Calculator - Interactive Mode".bold());
    println!(
        "Type {} for help, {} to exit\n",
        "/help".cyan(),
        "/exit".cyan()
    );

    let mut rl = readline::Readline::new(COMMANDS, None)?;

    loop {
        match rl.readline("feecalc> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Ok(Command::Exit) => {
                        println!("Goodbye!");
                        break;
                    }
                    Ok(cmd) => match dispatch_command(&mut session, cmd, json_output) {
                        Ok(output) => print!("{}", output),
                        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                    },
                    Err(e) => {
                        eprintln!("{} {}", "Parse error:".yellow().bold(), e.message);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}
