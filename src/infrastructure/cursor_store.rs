//! Durable cursor positions keyed by resource name.
//!
//! The registry talks to persistence only through [`CursorStore`]. Stores
//! are driven in a fixed sequence at startup: `exists`, `create_empty` if
//! needed, then `load`. After that `get` and `set` may be called freely.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{AppConfig, AppError, Result, StorageBackend};

use super::sqlite_store::SqliteCursorStore;
use super::toml_store::TomlCursorStore;

/// Logical namespace all cursor records live under.
pub const NAMESPACE: &str = "files";

/// Key to cursor-position mapping that survives process restarts.
pub trait CursorStore: Send {
    /// Whether the backing store has been created.
    fn exists(&self) -> bool;

    /// Create an empty backing store.
    ///
    /// # Errors
    /// Returns error if the store cannot be created.
    fn create_empty(&mut self) -> Result<()>;

    /// Open an existing backing store for reads and writes.
    ///
    /// # Errors
    /// Returns error if the store cannot be opened or parsed.
    fn load(&mut self) -> Result<()>;

    /// Last recorded position for `name`, or `None` if never recorded.
    ///
    /// # Errors
    /// Returns error if the store has not been loaded or the read fails.
    fn get(&self, name: &str) -> Result<Option<usize>>;

    /// Record `position` for `name`. Durable once this returns `Ok`.
    ///
    /// # Errors
    /// Returns error if the write cannot be completed.
    fn set(&mut self, name: &str, position: usize) -> Result<()>;
}

/// Build the store selected by the configuration.
#[must_use]
pub fn store_for_config(config: &AppConfig) -> Box<dyn CursorStore> {
    match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteCursorStore::new(config.store_path())),
        StorageBackend::Toml => Box::new(TomlCursorStore::new(config.store_path())),
        StorageBackend::Memory => Box::new(MemoryCursorStore::new()),
    }
}

/// Stored integers that cannot be a cursor are treated as unrecorded.
pub(crate) fn position_from_stored(name: &str, raw: i64) -> Option<usize> {
    match usize::try_from(raw) {
        Ok(position) => Some(position),
        Err(_) => {
            tracing::warn!(resource = %name, value = raw, "Ignoring invalid stored cursor");
            None
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    created: bool,
    loaded: bool,
    positions: HashMap<String, usize>,
    fail_writes: bool,
}

/// In-memory cursor store.
///
/// Clones share state, so a registry rebuilt over a clone sees every
/// position written through the original. Nothing outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursorStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryCursorStore {
    /// Create an empty, not yet created store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, for exercising error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Raw position for `name`, bypassing the load check.
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<usize> {
        self.state.lock().positions.get(name).copied()
    }
}

impl CursorStore for MemoryCursorStore {
    fn exists(&self) -> bool {
        self.state.lock().created
    }

    fn create_empty(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.created = true;
        state.positions.clear();
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        if !state.created {
            return Err(AppError::persistence("Memory store has not been created"));
        }
        state.loaded = true;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<usize>> {
        let state = self.state.lock();
        if !state.loaded {
            return Err(AppError::persistence("Memory store has not been loaded"));
        }
        Ok(state.positions.get(name).copied())
    }

    fn set(&mut self, name: &str, position: usize) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(AppError::persistence("Simulated write error"));
        }
        if !state.loaded {
            return Err(AppError::persistence("Memory store has not been loaded"));
        }
        state.positions.insert(name.to_string(), position);
        Ok(())
    }
}
