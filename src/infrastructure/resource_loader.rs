//! Resource discovery.
//!
//! Scans a directory for line files and reads each one into memory.

use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{AppError, Resource, Result};

/// Whether a file name carries the extension marker.
#[must_use]
pub fn is_resource_file(file_name: &str, extension: &str) -> bool {
    !extension.is_empty() && file_name.contains(extension)
}

/// Resource name for a file: every occurrence of the marker removed.
#[must_use]
pub fn resource_name(file_name: &str, extension: &str) -> String {
    file_name.replace(extension, "")
}

/// Reads every resource file in `dir`, sorted by resource name.
///
/// Sub-directories and files without the marker are skipped. Any read
/// failure aborts the whole scan.
///
/// # Errors
/// Returns error if the directory or any resource file cannot be read.
pub fn load_resources(dir: &Path, extension: &str) -> Result<Vec<Resource>> {
    if !dir.is_dir() {
        return Err(AppError::ResourceDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut candidates = Vec::new();

    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::debug!("Skipping non-UTF-8 file name: {}", path.display());
            continue;
        };
        if !is_resource_file(file_name, extension) {
            continue;
        }

        candidates.push((file_name.to_string(), path));
    }

    // Directory order is unspecified; the first file name wins a name clash.
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen = HashSet::new();
    let mut resources = Vec::with_capacity(candidates.len());

    for (file_name, path) in candidates {
        let name = resource_name(&file_name, extension);
        if !seen.insert(name.clone()) {
            tracing::warn!(
                resource = %name,
                file = %file_name,
                "Skipping file with duplicate resource name"
            );
            continue;
        }

        let lines = read_lines(&path)?;
        tracing::debug!(resource = %name, lines = lines.len(), "Loaded resource");

        resources.push(Resource { name, lines });
    }

    resources.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(resources)
}

/// Reads a file as one entry per line; `\n` and `\r\n` are both accepted
/// and an unterminated last line is kept.
///
/// # Errors
/// Returns error if the file cannot be opened or is not valid UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open {}", path.display()), e))?;

    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| AppError::io(format!("Failed to read {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_marker_matching_and_naming() {
        assert!(is_resource_file("colors.txt", ".txt"));
        assert!(is_resource_file("notes.txt.bak", ".txt"));
        assert!(!is_resource_file("colors.csv", ".txt"));
        assert!(!is_resource_file("colors.txt", ""));

        assert_eq!(resource_name("colors.txt", ".txt"), "colors");
        assert_eq!(resource_name("notes.txt.bak", ".txt"), "notes.bak");
    }

    #[test]
    fn test_load_resources_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("zebra.txt"), "z\n").unwrap();
        fs::write(dir.path().join("colors.txt"), "red\ngreen\nblue\n").unwrap();
        fs::write(dir.path().join("ignored.md"), "nope\n").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let resources = load_resources(dir.path(), ".txt").unwrap();

        let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["colors", "zebra"]);
        assert_eq!(resources[0].lines, ["red", "green", "blue"]);
    }

    #[test]
    fn test_read_lines_handles_crlf_and_partial_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(&path, "one\r\ntwo\n\nfour").unwrap();

        assert_eq!(read_lines(&path).unwrap(), ["one", "two", "", "four"]);
    }

    #[test]
    fn test_empty_file_has_no_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(read_lines(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(matches!(
            load_resources(&missing, ".txt"),
            Err(AppError::ResourceDirNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_aborts_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, b'\n']).unwrap();

        assert!(matches!(
            load_resources(dir.path(), ".txt"),
            Err(AppError::Io { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_keep_first_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt.txt"), "one\ntwo\nthree\n").unwrap();
        fs::write(dir.path().join("a.txt"), "solo\n").unwrap();

        let resources = load_resources(dir.path(), ".txt").unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "a");
        assert_eq!(resources[0].lines, vec!["solo"]);
    }
}
