//! Cursor registry.
//!
//! Owns every loaded resource and the cursor store behind them. A single
//! lock guards the whole registry; each operation holds it from lookup
//! through the persistence write, so the value a caller sees and the
//! position on disk change together.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{AppConfig, LineStore, NextLine, Resource, ResourceSummary, Result};
use crate::infrastructure::{load_resources, store_for_config, CursorStore};

struct Inner {
    resources: HashMap<String, LineStore>,
    store: Box<dyn CursorStore>,
    rng: StdRng,
}

impl Inner {
    /// Straight-line startup: ensure the store exists, open it, then build
    /// a fresh resource map with restored cursors.
    fn build(&mut self, dir: &Path, extension: &str) -> Result<HashMap<String, LineStore>> {
        if !self.store.exists() {
            self.store.create_empty()?;
        }
        self.store.load()?;

        let loaded = load_resources(dir, extension)?;
        let mut resources = HashMap::with_capacity(loaded.len());

        for Resource { name, lines } in loaded {
            let mut line_store = LineStore::new(lines);

            if let Some(cursor) = self.store.get(&name)? {
                if !line_store.seek(cursor) {
                    tracing::warn!(
                        resource = %name,
                        cursor,
                        lines = line_store.count(),
                        "Stored cursor is past the end of the resource, starting over"
                    );
                }
            }

            resources.insert(name, line_store);
        }

        Ok(resources)
    }
}

/// Thread-safe map from resource name to its lines and cursor.
pub struct CursorRegistry {
    inner: Mutex<Inner>,
}

impl CursorRegistry {
    /// Create an empty registry over `store` with an entropy-seeded shuffle
    /// source. Call [`initialize`](Self::initialize) before use.
    #[must_use]
    pub fn new(store: Box<dyn CursorStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Create an empty registry whose shuffles are reproducible.
    #[must_use]
    pub fn with_seed(store: Box<dyn CursorStore>, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: Box<dyn CursorStore>, rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(Inner {
                resources: HashMap::new(),
                store,
                rng,
            }),
        }
    }

    /// Build the store named by `config` and load its resource directory.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = store_for_config(config);
        let registry = match config.cursor.shuffle_seed {
            Some(seed) => Self::with_seed(store, seed),
            None => Self::new(store),
        };
        registry.initialize(&config.resources.dir, &config.resources.extension)?;
        Ok(registry)
    }

    /// Load every resource in `dir`, replacing whatever was loaded before.
    ///
    /// Cursors are restored from the store; unknown names start at 0.
    /// Resources no longer present disappear, and their stored cursors are
    /// left untouched. On failure the registry is left empty.
    ///
    /// # Errors
    /// Returns error if the store cannot be created or opened, or if the
    /// directory or any resource file cannot be read.
    pub fn initialize(&self, dir: &Path, extension: &str) -> Result<()> {
        let mut inner = self.inner.lock();

        match inner.build(dir, extension) {
            Ok(resources) => {
                tracing::info!(
                    dir = %dir.display(),
                    resources = resources.len(),
                    "Registry initialized"
                );
                inner.resources = resources;
                Ok(())
            }
            Err(e) => {
                inner.resources.clear();
                Err(e)
            }
        }
    }

    /// Read the next line of `name`.
    ///
    /// `wrap` selects the exhaustion policy. When a line is returned, the
    /// new cursor is written to the store before the lock is released; if
    /// that write fails the cursor is put back and the error returned.
    ///
    /// # Errors
    /// Returns error if the new cursor cannot be persisted.
    pub fn next_line(&self, name: &str, wrap: bool) -> Result<NextLine> {
        let mut guard = self.inner.lock();
        let Inner {
            resources, store, ..
        } = &mut *guard;

        let Some(lines) = resources.get_mut(name) else {
            return Ok(NextLine::NotFound);
        };

        let before = lines.cursor();
        let Some(line) = lines.advance(wrap) else {
            return Ok(NextLine::Exhausted);
        };

        if let Err(e) = store.set(name, lines.cursor()) {
            lines.seek(before);
            return Err(e);
        }

        tracing::debug!(
            resource = %name,
            cursor = lines.cursor(),
            lines = lines.count(),
            "Advanced cursor"
        );

        Ok(NextLine::Found(line))
    }

    /// Read the next line of `name` as a plain string.
    ///
    /// Unknown names, exhausted resources and failed writes all yield an
    /// empty string; use [`next_line`](Self::next_line) to tell them apart.
    pub fn next(&self, name: &str, wrap: bool) -> String {
        match self.next_line(name, wrap) {
            Ok(next) => next.into_string(),
            Err(e) => {
                tracing::warn!(resource = %name, error = %e, "Failed to persist cursor");
                String::new()
            }
        }
    }

    /// Number of lines in `name`, 0 if it is not loaded.
    pub fn count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .resources
            .get(name)
            .map_or(0, LineStore::count)
    }

    /// Move the cursor of `name` back to the first line and persist it.
    ///
    /// Returns `false` if no such resource is loaded.
    ///
    /// # Errors
    /// Returns error if the reset cannot be persisted; the cursor is left
    /// where it was.
    pub fn reset_pointer(&self, name: &str) -> Result<bool> {
        let mut guard = self.inner.lock();
        let Inner {
            resources, store, ..
        } = &mut *guard;

        let Some(lines) = resources.get_mut(name) else {
            return Ok(false);
        };

        let before = lines.cursor();
        lines.reset();

        if let Err(e) = store.set(name, 0) {
            lines.seek(before);
            return Err(e);
        }

        tracing::debug!(resource = %name, "Reset cursor");
        Ok(true)
    }

    /// Shuffle the lines of `name` with the registry's random source.
    ///
    /// Returns `false` if no such resource is loaded.
    pub fn shuffle(&self, name: &str) -> bool {
        let mut guard = self.inner.lock();
        let Inner { resources, rng, .. } = &mut *guard;

        resources
            .get_mut(name)
            .map(|lines| lines.shuffle(rng))
            .is_some()
    }

    /// Shuffle the lines of `name` with a caller-supplied random source.
    ///
    /// Returns `false` if no such resource is loaded.
    pub fn shuffle_with<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> bool {
        self.inner
            .lock()
            .resources
            .get_mut(name)
            .map(|lines| lines.shuffle(rng))
            .is_some()
    }

    /// Reverse the lines of `name`.
    ///
    /// Returns `false` if no such resource is loaded.
    pub fn reverse(&self, name: &str) -> bool {
        self.inner
            .lock()
            .resources
            .get_mut(name)
            .map(LineStore::reverse)
            .is_some()
    }

    /// Whether `name` is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().resources.contains_key(name)
    }

    /// Current cursor of `name`.
    pub fn cursor(&self, name: &str) -> Option<usize> {
        self.inner.lock().resources.get(name).map(LineStore::cursor)
    }

    /// Copy of the current line order of `name`.
    pub fn lines(&self, name: &str) -> Option<Vec<String>> {
        self.inner
            .lock()
            .resources
            .get(name)
            .map(|lines| lines.lines().to_vec())
    }

    /// Loaded resource names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().resources.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of every loaded resource, sorted by name.
    pub fn summaries(&self) -> Vec<ResourceSummary> {
        let inner = self.inner.lock();
        let mut summaries: Vec<ResourceSummary> = inner
            .resources
            .iter()
            .map(|(name, lines)| ResourceSummary {
                name: name.clone(),
                lines: lines.count(),
                cursor: lines.cursor(),
                exhausted: lines.is_exhausted(),
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Number of loaded resources.
    pub fn len(&self) -> usize {
        self.inner.lock().resources.len()
    }

    /// Whether no resources are loaded.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().resources.is_empty()
    }
}
