//! Line-oriented command session over one registry.
//!
//! One command per input line; output goes to the given writer so a
//! session can be driven from tests as easily as from a terminal.

use std::io::{BufRead, Write};

use line_cursor::application::{format_next_line, format_summaries_table, CursorRegistry};
use line_cursor::domain::{AppError, Result};

const HELP: &str = "\
commands:
  next NAME      next line, default policy
  next! NAME     next line, stop at the end
  next~ NAME     next line, wrap at the end
  count NAME     number of lines
  shuffle NAME   shuffle line order
  reverse NAME   reverse line order
  reset NAME     move cursor to the first line
  list           show all resources
  help           show this text
  quit           end the session";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Next { name: String, wrap: Option<bool> },
    Count(String),
    Shuffle(String),
    Reverse(String),
    Reset(String),
    List,
    Help,
    Quit,
}

impl std::str::FromStr for ShellCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let name = parts.next().map(str::to_string);

        if let Some(extra) = parts.next() {
            return Err(format!("Unexpected argument: {extra}"));
        }

        let need_name = || name.clone().ok_or_else(|| format!("{verb} needs a resource name"));

        match verb {
            "next" => Ok(Self::Next { name: need_name()?, wrap: None }),
            "next!" => Ok(Self::Next { name: need_name()?, wrap: Some(false) }),
            "next~" => Ok(Self::Next { name: need_name()?, wrap: Some(true) }),
            "count" => need_name().map(Self::Count),
            "shuffle" => need_name().map(Self::Shuffle),
            "reverse" => need_name().map(Self::Reverse),
            "reset" => need_name().map(Self::Reset),
            "list" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(format!("Unknown command: {verb}. Type help for a list")),
        }
    }
}

/// Run commands from `input` until it ends or `quit` is read.
///
/// # Errors
/// Returns error if reading input or writing output fails. Failed cursor
/// writes are reported inline and do not end the session.
pub fn run_shell<R: BufRead, W: Write>(
    registry: &CursorRegistry,
    default_wrap: bool,
    input: R,
    mut output: W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.map_err(|e| AppError::io("Failed to read command", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(registry, default_wrap, command),
            Err(message) => message,
        };

        writeln!(output, "{reply}").map_err(|e| AppError::io("Failed to write output", e))?;
    }

    output
        .flush()
        .map_err(|e| AppError::io("Failed to write output", e))
}

fn execute(registry: &CursorRegistry, default_wrap: bool, command: ShellCommand) -> String {
    let missing = |name: &str| format!("no resource named {name}");

    match command {
        ShellCommand::Next { name, wrap } => {
            match registry.next_line(&name, wrap.unwrap_or(default_wrap)) {
                Ok(next) => format_next_line(&name, &next),
                Err(e) => format!("error: {e}"),
            }
        }
        ShellCommand::Count(name) => {
            if registry.contains(&name) {
                registry.count(&name).to_string()
            } else {
                missing(&name)
            }
        }
        ShellCommand::Shuffle(name) => {
            if registry.shuffle(&name) {
                "shuffled".to_string()
            } else {
                missing(&name)
            }
        }
        ShellCommand::Reverse(name) => {
            if registry.reverse(&name) {
                "reversed".to_string()
            } else {
                missing(&name)
            }
        }
        ShellCommand::Reset(name) => match registry.reset_pointer(&name) {
            Ok(true) => "reset".to_string(),
            Ok(false) => missing(&name),
            Err(e) => format!("error: {e}"),
        },
        ShellCommand::List => format_summaries_table(&registry.summaries()),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => String::new(),
    }
}
