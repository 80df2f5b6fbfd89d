//! Line Cursor - persistent read positions over a directory of line files.
//!
//! Each `*.txt` file in a directory becomes a named resource. Callers pull
//! the next line of a resource under a wrap-around or stop policy, and the
//! position survives restarts through a pluggable cursor store.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use line_cursor::application::CursorRegistry;
//! use line_cursor::infrastructure::SqliteCursorStore;
//!
//! let registry = CursorRegistry::new(Box::new(SqliteCursorStore::new("cursors.db")));
//! registry.initialize(Path::new("files"), ".txt")?;
//! let line = registry.next("colors", true);
//! # Ok::<(), line_cursor::domain::AppError>(())
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::CursorRegistry;
pub use domain::{AppError, NextLine, Result};
