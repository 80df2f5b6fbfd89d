//! Application layer - use cases and orchestration.
//!
//! This layer contains the cursor registry and the formatting of its
//! state for display.

pub mod formatter;
pub mod registry;

pub use formatter::{format_next_line, format_summaries, format_summaries_table, OutputFormat};
pub use registry::CursorRegistry;
