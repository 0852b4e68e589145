//! Readline wrapper with command and option completion.

use std::path::PathBuf;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};

/// A command name and the options it accepts.
pub type CommandSpec = (&'static str, &'static [&'static str]);

pub struct CommandHelper {
    commands: Vec<CommandSpec>,
    hinter: HistoryHinter,
}

impl CommandHelper {
    pub fn new(commands: &[CommandSpec]) -> Self {
        Self {
            commands: commands.to_vec(),
            hinter: HistoryHinter::default(),
        }
    }

    fn candidates(&self, tokens: &[&str], prefix: &str) -> Vec<String> {
        if tokens.len() <= 1 {
            let slash = prefix.starts_with('/');
            let bare = prefix.trim_start_matches('/').to_lowercase();
            return self
                .commands
                .iter()
                .filter(|(name, _)| name.starts_with(&bare))
                .map(|(name, _)| if slash { format!("/{}", name) } else { name.to_string() })
                .collect();
        }

        if !prefix.starts_with('-') {
            return Vec::new();
        }

        let command = tokens[0].trim_start_matches('/').to_lowercase();
        // The last token is the one being completed.
        let used = &tokens[..tokens.len() - 1];
        self.commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, options)| {
                options
                    .iter()
                    .filter(|opt| opt.starts_with(prefix) && !used.contains(*opt))
                    .map(|opt| opt.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Helper for CommandHelper {}
impl Validator for CommandHelper {}
impl Highlighter for CommandHelper {}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let mut tokens: Vec<&str> = before.split_whitespace().collect();

        // Treat trailing space as start of a new token
        if before.is_empty() || before.chars().last().is_some_and(|c| c.is_whitespace()) {
            tokens.push("");
        }

        let prefix = tokens.last().copied().unwrap_or("");
        let start = pos.saturating_sub(prefix.len());

        let mut matches: Vec<Pair> = self
            .candidates(&tokens, prefix)
            .into_iter()
            .map(|c| {
                let replacement = format!("{} ", c);
                Pair {
                    display: replacement.clone(),
                    replacement,
                }
            })
            .collect();

        matches.sort_by(|a, b| a.replacement.cmp(&b.replacement));
        matches.dedup_by(|a, b| a.replacement == b.replacement);

        Ok((start, matches))
    }
}

/// Thin wrapper over `rustyline::Editor` with preset commands and history path.
pub struct Readline {
    editor: Editor<CommandHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Readline {
    pub fn new(commands: &[CommandSpec], history_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandHelper::new(commands)));

        let history_path = history_path.unwrap_or_else(default_history_path);
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.load_history(&history_path);

        Ok(Self {
            editor,
            history_path,
        })
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        let line = self.editor.readline(prompt)?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
            let _ = self.editor.append_history(&self.history_path);
        }
        Ok(line)
    }

    /// Completions with their replacement start index, without terminal input.
    pub fn completions_with_start(&self, line: &str) -> Vec<(usize, String)> {
        if let Some(helper) = self.editor.helper() {
            let pos = line.len();
            let history = self.editor.history();
            if let Ok((start, pairs)) = helper.complete(line, pos, &Context::new(history)) {
                return pairs.into_iter().map(|p| (start, p.replacement)).collect();
            }
        }
        Vec::new()
    }

    pub fn completions(&self, line: &str) -> Vec<String> {
        self.completions_with_start(line)
            .into_iter()
            .map(|(_, c)| c)
            .collect()
    }
}

fn default_history_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".feecalc").join("history")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[CommandSpec] = &[
        ("calc", &["--custodian", "--comment", "--com", "--exclude"]),
        ("clear", &[]),
        ("add", &["--submitter", "--auditor"]),
    ];

    fn readline(name: &str) -> Readline {
        let tmp = std::env::temp_dir().join(format!("feecalc_history_test_{}", name));
        let _ = std::fs::remove_file(&tmp);
        Readline::new(SPECS, Some(tmp)).unwrap()
    }

    #[test]
    fn test_completes_command_names() {
        let rl = readline("names");
        assert_eq!(rl.completions("c"), vec!["calc ", "clear "]);
        assert_eq!(rl.completions("/a"), vec!["/add "]);
    }

    #[test]
    fn test_completes_options_for_command() {
        let rl = readline("options");
        assert_eq!(
            rl.completions_with_start("calc 100 --com"),
            vec![(9, "--com ".to_string()), (9, "--comment ".to_string())]
        );
        assert_eq!(rl.completions("add --s"), vec!["--submitter "]);
    }

    #[test]
    fn test_skips_used_options_and_positionals() {
        let rl = readline("used");
        assert_eq!(rl.completions("add --auditor x --"), vec!["--submitter "]);
        assert_eq!(
            rl.completions("calc 1 --custodian x --c"),
            vec!["--com ", "--comment "]
        );
        assert!(rl.completions("calc 10").is_empty());
        assert!(rl.completions("unknown --").is_empty());
    }
}
