//! Application configuration.
//!
//! Contains the sections of the TOML configuration file: where resources
//! live, which cursor store backs them, and the default read policy.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where resources are discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Directory scanned for resource files.
    #[serde(default = "default_resource_dir")]
    pub dir: PathBuf,

    /// Marker a file name must contain; it is stripped to form the name.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            dir: default_resource_dir(),
            extension: default_extension(),
        }
    }
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_extension() -> String {
    ".txt".to_string()
}

/// Which cursor store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `SQLite` database.
    #[default]
    Sqlite,
    /// TOML file with a `[files]` table.
    Toml,
    /// Process-local only; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Toml => write!(f, "toml"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Configuration for cursor persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Store file; relative paths resolve against the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Base data directory (optional, defaults to ~/.line-cursor).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Read policy defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Wrap to the first line after the last one.
    #[serde(default = "default_wrap")]
    pub wrap: bool,

    /// Fixed shuffle seed; entropy-seeded when absent.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            wrap: default_wrap(),
            shuffle_seed: None,
        }
    }
}

const fn default_wrap() -> bool {
    true
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Resource discovery.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Cursor persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Read policy.
    #[serde(default)]
    pub cursor: CursorConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".line-cursor")
    }

    /// Get the cursor store path for the configured backend.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        let file = self.storage.path.clone().unwrap_or_else(|| {
            PathBuf::from(match self.storage.backend {
                StorageBackend::Toml => "cursors.toml",
                StorageBackend::Sqlite | StorageBackend::Memory => "cursors.db",
            })
        });
        resolve(&self.data_dir(), &file)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
