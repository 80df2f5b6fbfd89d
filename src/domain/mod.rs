//! Domain layer - core state and types.
//!
//! This layer contains the line store state machine, models, configuration
//! and error types without any external I/O.

pub mod config;
pub mod error;
pub mod line_store;
pub mod models;

pub use config::{AppConfig, CursorConfig, ResourceConfig, StorageBackend, StorageConfig};
pub use error::{AppError, InitError, Result};
pub use line_store::LineStore;
pub use models::{NextLine, Resource, ResourceSummary};
