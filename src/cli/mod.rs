//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use line_cursor::application::OutputFormat;

/// Line Cursor - hand out lines from text files, remembering where you left off.
#[derive(Parser, Debug)]
#[command(name = "line-cursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ~/.line-cursor/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resource directory, overriding the configured one.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file.
    Init,

    /// Print the next line of a resource and advance its cursor.
    Next {
        /// Resource name (file name without extension).
        name: String,

        /// Stop at the last line instead of starting over.
        #[arg(long, conflicts_with = "wrap")]
        stop: bool,

        /// Start over after the last line.
        #[arg(long)]
        wrap: bool,
    },

    /// Print the number of lines in a resource.
    Count {
        /// Resource name.
        name: String,
    },

    /// Move a resource's cursor back to its first line.
    Reset {
        /// Resource name.
        name: String,
    },

    /// List loaded resources with their cursors.
    List {
        /// Output format: table, json, or plain.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Read commands from stdin against one loaded registry.
    Shell,
}

impl Commands {
    /// Resolve the wrap policy of a `next` command against the default.
    #[must_use]
    pub const fn wrap_policy(stop: bool, wrap: bool, default: bool) -> bool {
        if stop {
            false
        } else if wrap {
            true
        } else {
            default
        }
    }
}

/// Parse a list output format argument.
///
/// # Errors
/// Returns the parse message for unknown formats.
pub fn parse_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}
