//! Domain models for line resources and cursor reads.

use serde::Serialize;

/// A resource as discovered on disk: its name and its lines in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// File name with the extension marker removed.
    pub name: String,
    /// One entry per newline-delimited record.
    pub lines: Vec<String>,
}

/// Outcome of reading the next line of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLine {
    /// The line that was under the cursor.
    Found(String),
    /// The resource has no line to give under the stop policy, either
    /// because it was read to the end or because it is empty.
    Exhausted,
    /// No resource with that name is loaded.
    NotFound,
}

impl NextLine {
    /// Collapse to a plain string, empty for anything but `Found`.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Found(line) => line,
            Self::Exhausted | Self::NotFound => String::new(),
        }
    }
}

/// Point-in-time view of one loaded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    /// Resource name.
    pub name: String,
    /// Number of lines.
    pub lines: usize,
    /// Index of the next line to be returned.
    pub cursor: usize,
    /// Whether the cursor sits past the last line.
    pub exhausted: bool,
}
