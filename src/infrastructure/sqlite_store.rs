//! `SQLite` cursor store.
//!
//! Keeps one row per resource name. Writes run with `synchronous = FULL`
//! so a position is on disk by the time `set` returns.

use std::path::PathBuf;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Result};

use super::cursor_store::{position_from_stored, CursorStore, NAMESPACE};

/// Cursor store backed by a `SQLite` database file.
pub struct SqliteCursorStore {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteCursorStore {
    /// Create a store for the database at `path`. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Opens the database and applies the schema.
    fn open(&self) -> Result<Connection> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(&self.path).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;",
        )
        .map_err(AppError::database)?;

        init_schema(&conn)?;

        Ok(conn)
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| AppError::persistence("Cursor database has not been loaded"))
    }
}

/// Initialize database schema.
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS cursors (
            namespace TEXT NOT NULL,
            name TEXT NOT NULL,
            position INTEGER NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (namespace, name)
        );
        ",
    )
    .map_err(AppError::database)
}

impl CursorStore for SqliteCursorStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create_empty(&mut self) -> Result<()> {
        let conn = self.open()?;
        tracing::info!(path = %self.path.display(), "Created cursor database");
        drop(conn);
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        self.conn = Some(self.open()?);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<usize>> {
        let raw = self
            .conn()?
            .query_row(
                "SELECT position FROM cursors WHERE namespace = ?1 AND name = ?2",
                params![NAMESPACE, name],
                |row| row.get::<_, Value>(0),
            )
            .optional()
            .map_err(AppError::database)?;

        Ok(raw.and_then(|value| match value {
            Value::Integer(raw) => position_from_stored(name, raw),
            other => {
                tracing::warn!(resource = %name, value = ?other, "Ignoring invalid stored cursor");
                None
            }
        }))
    }

    fn set(&mut self, name: &str, position: usize) -> Result<()> {
        let value = i64::try_from(position)
            .map_err(|_| AppError::persistence(format!("Cursor {position} does not fit in storage")))?;

        self.conn()?
            .execute(
                r"
            INSERT INTO cursors (namespace, name, position)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(namespace, name) DO UPDATE SET
                position = excluded.position,
                updated_at = datetime('now')
            ",
                params![NAMESPACE, name, value],
            )
            .map_err(AppError::database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_then_load() {
        let dir = tempdir().unwrap();
        let mut store = SqliteCursorStore::new(dir.path().join("state/cursors.db"));

        assert!(!store.exists());
        store.create_empty().unwrap();
        assert!(store.exists());

        store.load().unwrap();
        assert_eq!(store.get("colors").unwrap(), None);
    }

    #[test]
    fn test_get_before_load_fails() {
        let dir = tempdir().unwrap();
        let store = SqliteCursorStore::new(dir.path().join("cursors.db"));

        assert!(matches!(
            store.get("colors"),
            Err(AppError::Persistence { .. })
        ));
    }

    #[test]
    fn test_positions_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursors.db");

        let mut store = SqliteCursorStore::new(&path);
        store.create_empty().unwrap();
        store.load().unwrap();
        store.set("colors", 1).unwrap();
        store.set("colors", 2).unwrap();
        store.set("animals", 5).unwrap();
        drop(store);

        let mut reopened = SqliteCursorStore::new(&path);
        reopened.load().unwrap();
        assert_eq!(reopened.get("colors").unwrap(), Some(2));
        assert_eq!(reopened.get("animals").unwrap(), Some(5));
    }

    #[test]
    fn test_negative_row_reads_as_absent() {
        let dir = tempdir().unwrap();
        let mut store = SqliteCursorStore::new(dir.path().join("cursors.db"));
        store.load().unwrap();

        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO cursors (namespace, name, position) VALUES (?1, 'bad', -3)",
                [NAMESPACE],
            )
            .unwrap();

        assert_eq!(store.get("bad").unwrap(), None);
    }

    #[test]
    fn test_non_integer_rows_read_as_absent() {
        let dir = tempdir().unwrap();
        let mut store = SqliteCursorStore::new(dir.path().join("cursors.db"));
        store.load().unwrap();

        store
            .conn()
            .unwrap()
            .execute_batch(
                "INSERT INTO cursors (namespace, name, position) VALUES ('files', 'colors', 'two');
                 INSERT INTO cursors (namespace, name, position) VALUES ('files', 'shapes', 1.5);
                 INSERT INTO cursors (namespace, name, position) VALUES ('files', 'animals', 1);",
            )
            .unwrap();

        assert_eq!(store.get("colors").unwrap(), None);
        assert_eq!(store.get("shapes").unwrap(), None);
        assert_eq!(store.get("animals").unwrap(), Some(1));
    }
}
