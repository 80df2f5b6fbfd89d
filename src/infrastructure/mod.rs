//! Infrastructure layer - external adapters (database, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod cursor_store;
pub mod resource_loader;
pub mod sqlite_store;
pub mod toml_store;

pub use config::{config_file_path, ensure_config_exists, load_config};
pub use cursor_store::{store_for_config, CursorStore, MemoryCursorStore};
pub use resource_loader::load_resources;
pub use sqlite_store::SqliteCursorStore;
pub use toml_store::TomlCursorStore;
