//! Output formatting for resource listings.
//!
//! Supports multiple output formats: table, JSON, and plain text.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{NextLine, ResourceSummary};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Bordered table.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
    /// One tab-separated record per line.
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "plain" | "text" => Ok(Self::Plain),
            _ => Err(format!("Unknown format: {s}. Use: table, json, plain")),
        }
    }
}

/// Formats resource summaries in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_summaries(
    summaries: &[ResourceSummary],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(format_summaries_table(summaries)),
        OutputFormat::Json => serde_json::to_string_pretty(summaries),
        OutputFormat::Plain => Ok(format_summaries_plain(summaries)),
    }
}

/// Formats resource summaries as a table.
#[must_use]
pub fn format_summaries_table(summaries: &[ResourceSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Resource", "Lines", "Cursor", "State"]);

    for summary in summaries {
        let state = if summary.lines == 0 {
            "empty"
        } else if summary.exhausted {
            "exhausted"
        } else {
            "live"
        };

        table.add_row(vec![
            summary.name.clone(),
            summary.lines.to_string(),
            summary.cursor.to_string(),
            state.to_string(),
        ]);
    }

    table.to_string()
}

fn format_summaries_plain(summaries: &[ResourceSummary]) -> String {
    summaries
        .iter()
        .map(|s| format!("{}\t{}\t{}", s.name, s.lines, s.cursor))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the outcome of a read for a terminal.
#[must_use]
pub fn format_next_line(name: &str, next: &NextLine) -> String {
    match next {
        NextLine::Found(line) => line.clone(),
        NextLine::Exhausted => format!("{} {name} is exhausted", "∅".yellow()),
        NextLine::NotFound => format!("{} no resource named {name}", "✗".red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<ResourceSummary> {
        vec![
            ResourceSummary {
                name: "animals".into(),
                lines: 2,
                cursor: 2,
                exhausted: true,
            },
            ResourceSummary {
                name: "colors".into(),
                lines: 3,
                cursor: 1,
                exhausted: false,
            },
        ]
    }

    #[test]
    fn test_parse_format() {
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Plain)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_lists_every_resource() {
        let out = format_summaries_table(&summaries());
        assert!(out.contains("animals"));
        assert!(out.contains("exhausted"));
        assert!(out.contains("colors"));
    }

    #[test]
    fn test_plain_is_tab_separated() {
        let out = format_summaries(&summaries(), OutputFormat::Plain).unwrap();
        assert_eq!(out, "animals\t2\t2\ncolors\t3\t1");
    }

    #[test]
    fn test_json_round_trips() {
        let out = format_summaries(&summaries(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["name"], "colors");
        assert_eq!(value[0]["exhausted"], true);
    }

    #[test]
    fn test_found_line_is_printed_verbatim() {
        assert_eq!(format_next_line("colors", &NextLine::Found("red".into())), "red");
    }
}
