//! Domain-level error types for line-cursor.
//!
//! All errors are typed with `thiserror`. Only initialization and
//! persistence failures surface as errors; per-call conditions such as an
//! unknown resource or an exhausted cursor are ordinary values.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The resource directory does not exist or is not a directory.
    #[error("Resource directory not found: {path}")]
    ResourceDirNotFound { path: PathBuf },

    /// No resource with this name is loaded.
    #[error("No resource named '{name}'")]
    ResourceNotFound { name: String },

    /// Failed to open or query the cursor database.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The cursor store rejected an operation.
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

/// Errors that abort registry initialization.
pub type InitError = AppError;

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
