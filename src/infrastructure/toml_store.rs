//! TOML cursor store.
//!
//! Positions live in a `[files]` table, one `name = position` entry per
//! resource. Every write replaces the file atomically.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, Result};

use super::cursor_store::{position_from_stored, CursorStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CursorFile {
    #[serde(default)]
    files: BTreeMap<String, toml::Value>,
}

/// Cursor store backed by a human-editable TOML file.
pub struct TomlCursorStore {
    path: PathBuf,
    data: Option<CursorFile>,
}

impl TomlCursorStore {
    /// Create a store for the file at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: None,
        }
    }

    fn data(&self) -> Result<&CursorFile> {
        self.data
            .as_ref()
            .ok_or_else(|| AppError::persistence("Cursor file has not been loaded"))
    }

    /// Write via a sibling temp file so readers never see a partial file.
    fn write(&self, data: &CursorFile) -> Result<()> {
        let content = toml::to_string_pretty(data).map_err(|e| {
            AppError::persistence(format!("Failed to serialize cursor file: {e}"))
        })?;

        let tmp = self.path.with_extension("toml.tmp");
        let mut file = fs::File::create(&tmp)
            .map_err(|e| AppError::io(format!("Failed to create {}", tmp.display()), e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| AppError::io("Failed to write cursor file", e))?;
        file.sync_all()
            .map_err(|e| AppError::io("Failed to flush cursor file", e))?;

        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::io(format!("Failed to replace {}", self.path.display()), e)
        })?;

        sync_parent_dir(&self.path)
    }
}

/// Flush the directory entry of `path` so a completed rename survives a crash.
fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::File::open(parent)
        .and_then(|dir| dir.sync_all())
        .map_err(|e| AppError::io(format!("Failed to sync directory {}", parent.display()), e))
}

impl CursorStore for TomlCursorStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create_empty(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        fs::write(&self.path, "")
            .map_err(|e| AppError::io(format!("Failed to create {}", self.path.display()), e))?;

        tracing::info!(path = %self.path.display(), "Created cursor file");
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::io(format!("Failed to read cursor file: {}", self.path.display()), e)
        })?;

        let data: CursorFile = toml::from_str(&content).map_err(|e| {
            AppError::persistence(format!("Failed to parse cursor file: {e}"))
        })?;

        self.data = Some(data);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<usize>> {
        Ok(self
            .data()?
            .files
            .get(name)
            .and_then(|value| match value {
                toml::Value::Integer(raw) => position_from_stored(name, *raw),
                other => {
                    tracing::warn!(resource = %name, value = %other, "Ignoring invalid stored cursor");
                    None
                }
            }))
    }

    fn set(&mut self, name: &str, position: usize) -> Result<()> {
        let value = i64::try_from(position)
            .map_err(|_| AppError::persistence(format!("Cursor {position} does not fit in storage")))?;

        let data = self
            .data
            .as_mut()
            .ok_or_else(|| AppError::persistence("Cursor file has not been loaded"))?;
        let previous = data.files.insert(name.to_string(), toml::Value::Integer(value));

        let data = self.data()?;
        if let Err(e) = self.write(data) {
            // Keep the in-memory table equal to what is on disk.
            if let Some(data) = self.data.as_mut() {
                match previous {
                    Some(old) => data.files.insert(name.to_string(), old),
                    None => data.files.remove(name),
                };
            }
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_loads() {
        let dir = tempdir().unwrap();
        let mut store = TomlCursorStore::new(dir.path().join("cursors.toml"));

        store.create_empty().unwrap();
        store.load().unwrap();

        assert_eq!(store.get("colors").unwrap(), None);
    }

    #[test]
    fn test_set_writes_files_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        let mut store = TomlCursorStore::new(&path);
        store.create_empty().unwrap();
        store.load().unwrap();

        store.set("colors", 2).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[files]"));
        assert!(content.contains("colors = 2"));
    }

    #[test]
    fn test_set_replaces_file_and_syncs_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        let mut store = TomlCursorStore::new(&path);
        store.create_empty().unwrap();
        store.load().unwrap();

        store.set("colors", 1).unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        assert!(sync_parent_dir(&path).is_ok());
        assert!(sync_parent_dir(Path::new("cursors.toml")).is_ok());
    }

    #[test]
    fn test_positions_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        let mut store = TomlCursorStore::new(&path);
        store.create_empty().unwrap();
        store.load().unwrap();
        store.set("colors", 1).unwrap();
        store.set("animals", 3).unwrap();

        let mut reloaded = TomlCursorStore::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get("colors").unwrap(), Some(1));
        assert_eq!(reloaded.get("animals").unwrap(), Some(3));
    }

    #[test]
    fn test_hand_edited_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        fs::write(&path, "[files]\ncolors = 2\nbroken = -1\n").unwrap();

        let mut store = TomlCursorStore::new(&path);
        store.load().unwrap();

        assert_eq!(store.get("colors").unwrap(), Some(2));
        assert_eq!(store.get("broken").unwrap(), None);
    }

    #[test]
    fn test_non_integer_entries_read_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        fs::write(&path, "[files]\ncolors = \"two\"\nshapes = 1.5\nanimals = 1\n").unwrap();

        let mut store = TomlCursorStore::new(&path);
        store.load().unwrap();

        assert_eq!(store.get("colors").unwrap(), None);
        assert_eq!(store.get("shapes").unwrap(), None);
        assert_eq!(store.get("animals").unwrap(), Some(1));

        store.set("colors", 2).unwrap();
        let mut reloaded = TomlCursorStore::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get("colors").unwrap(), Some(2));
    }

    #[test]
    fn test_malformed_file_fails_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.toml");
        fs::write(&path, "[files\n").unwrap();

        let mut store = TomlCursorStore::new(&path);
        assert!(matches!(store.load(), Err(AppError::Persistence { .. })));
    }
}
