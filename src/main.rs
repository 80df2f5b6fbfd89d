//! Line Cursor - hand out lines from text files, remembering where you left off.
//!
//!   line-cursor init                    # Write ~/.line-cursor/config.toml
//!   line-cursor next colors             # Next line of files/colors.txt
//!   line-cursor next colors --stop      # Same, but stop after the last line
//!   line-cursor list --format json      # Cursors of every resource
//!   line-cursor shell < commands.txt    # Several commands against one load

mod cli;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{parse_format, shell, Cli, Commands};
use line_cursor::application::{format_next_line, format_summaries, CursorRegistry};
use line_cursor::domain::{self, AppConfig, AppError, NextLine};
use line_cursor::infrastructure::{config_file_path, ensure_config_exists, load_config};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    if matches!(cli.command, Commands::Init) {
        return cmd_init(cli.config.as_deref());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.dir {
        config.resources.dir = dir;
    }

    let registry = CursorRegistry::from_config(&config)?;

    match cli.command {
        Commands::Init => {}
        Commands::Next { name, stop, wrap } => {
            let wrap = Commands::wrap_policy(stop, wrap, config.cursor.wrap);
            cmd_next(&registry, &name, wrap)?;
        }
        Commands::Count { name } => {
            cmd_count(&registry, &name)?;
        }
        Commands::Reset { name } => {
            cmd_reset(&registry, &name)?;
        }
        Commands::List { format } => {
            cmd_list(&registry, &format)?;
        }
        Commands::Shell => {
            cmd_shell(&registry, &config)?;
        }
    }

    Ok(())
}

/// Write the default configuration file.
fn cmd_init(path: Option<&Path>) -> domain::Result<()> {
    let path = path.map_or_else(config_file_path, Path::to_path_buf);

    if ensure_config_exists(&path)? {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("Configuration already exists at {}", path.display());
    }

    Ok(())
}

/// Print the next line of a resource.
fn cmd_next(registry: &CursorRegistry, name: &str, wrap: bool) -> domain::Result<()> {
    match registry.next_line(name, wrap)? {
        NextLine::Found(line) => {
            println!("{line}");
            Ok(())
        }
        NextLine::Exhausted => {
            eprintln!("{}", format_next_line(name, &NextLine::Exhausted));
            Ok(())
        }
        NextLine::NotFound => Err(not_found(name)),
    }
}

/// Print the line count of a resource.
fn cmd_count(registry: &CursorRegistry, name: &str) -> domain::Result<()> {
    if !registry.contains(name) {
        return Err(not_found(name));
    }

    println!("{}", registry.count(name));
    Ok(())
}

/// Reset a resource's cursor.
fn cmd_reset(registry: &CursorRegistry, name: &str) -> domain::Result<()> {
    if !registry.reset_pointer(name)? {
        return Err(not_found(name));
    }

    println!("{} {} reset to line 1", "✓".green().bold(), name.cyan());
    Ok(())
}

/// List every loaded resource.
fn cmd_list(registry: &CursorRegistry, format: &str) -> domain::Result<()> {
    let format = parse_format(format).map_err(|message| AppError::Config { message })?;

    let output = format_summaries(&registry.summaries(), format).map_err(|e| AppError::Config {
        message: format!("Failed to serialize listing: {e}"),
    })?;

    println!("{output}");
    Ok(())
}

/// Run a command session on stdin.
fn cmd_shell(registry: &CursorRegistry, config: &AppConfig) -> domain::Result<()> {
    tracing::info!(
        resources = registry.len(),
        backend = %config.storage.backend,
        "Shell session started"
    );

    let stdin = std::io::stdin();
    shell::run_shell(registry, config.cursor.wrap, stdin.lock(), std::io::stdout())
}

fn not_found(name: &str) -> AppError {
    AppError::ResourceNotFound {
        name: name.to_string(),
    }
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
