//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`], an in-memory fixture tree that stands in for the
//! filesystem in unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory storage for testing.
///
/// Directory listings come back in **insertion order**, which lets tests pin
/// down the enumeration-order tie-break independently of alphabetical order.
/// Parent directories are created implicitly when a file is added.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docx_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("v1/guides/setup.md", "---\ntitle: Setup\n---\n")
///     .with_dir("v1/empty");
///
/// let entries = storage.list(Path::new("v1")).unwrap();
/// ```
#[derive(Debug)]
pub struct MockStorage {
    dirs: RwLock<HashMap<PathBuf, Vec<Entry>>>,
    files: RwLock<HashMap<PathBuf, String>>,
    unreadable: RwLock<HashSet<PathBuf>>,
}

impl Default for MockStorage {
    fn default() -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(PathBuf::new(), Vec::new());
        Self {
            dirs: RwLock::new(dirs),
            files: RwLock::new(HashMap::new()),
            unreadable: RwLock::new(HashSet::new()),
        }
    }
}

impl MockStorage {
    /// Create a new mock storage containing only an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content, creating parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.write_file(path, content);
        self
    }

    /// Add an (empty) directory, creating parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.ensure_dir(&path.into());
        self
    }

    /// Add a directory whose listing fails with `PermissionDenied`.
    ///
    /// Files below it can still be read directly, mirroring a directory
    /// without the read bit.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.ensure_dir(&path);
        self.unreadable.write().unwrap().insert(path);
        self
    }

    /// Create or overwrite a file after construction.
    ///
    /// Used to simulate content edits between calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn write_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path: PathBuf = path.into();
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.ensure_dir(&parent);
        let name = file_name(&path);

        let mut dirs = self.dirs.write().unwrap();
        let siblings = dirs.entry(parent).or_default();
        if !siblings.iter().any(|e| e.name == name) {
            siblings.push(Entry::file(name));
        }
        drop(dirs);

        self.files.write().unwrap().insert(path, content.into());
    }

    /// Register `path` and every missing ancestor as directories.
    fn ensure_dir(&self, path: &Path) {
        let mut dirs = self.dirs.write().unwrap();
        let mut current = path.to_path_buf();
        loop {
            if dirs.contains_key(&current) {
                break;
            }
            dirs.insert(current.clone(), Vec::new());
            let Some(parent) = current.parent().map(Path::to_path_buf) else {
                break;
            };
            let name = file_name(&current);
            let siblings = dirs.entry(parent.clone()).or_default();
            if !siblings.iter().any(|e| e.name == name) {
                siblings.push(Entry::dir(name));
            }
            current = parent;
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Storage for MockStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        if self.unreadable.read().unwrap().contains(dir) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(dir)
                .with_backend(BACKEND));
        }
        if let Some(entries) = self.dirs.read().unwrap().get(dir) {
            return Ok(entries.clone());
        }
        let kind = if self.files.read().unwrap().contains_key(dir) {
            StorageErrorKind::NotADirectory
        } else {
            StorageErrorKind::NotFound
        };
        Err(StorageError::new(kind).with_path(dir).with_backend(BACKEND))
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn stat(&self, path: &Path) -> Result<EntryKind, StorageError> {
        if self.files.read().unwrap().contains_key(path) {
            return Ok(EntryKind::File);
        }
        if self.dirs.read().unwrap().contains_key(path) {
            return Ok(EntryKind::Dir);
        }
        Err(StorageError::not_found(path).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(MockStorage: Send, Sync);

    #[test]
    fn test_new_has_empty_root() {
        let storage = MockStorage::new();

        assert!(storage.list(Path::new("")).unwrap().is_empty());
        assert!(storage.is_dir(Path::new("")));
    }

    #[test]
    fn test_with_file_creates_parents() {
        let storage = MockStorage::new().with_file("v1/guides/setup.md", "Setup");

        assert_eq!(storage.list(Path::new("")).unwrap(), vec![Entry::dir("v1")]);
        assert_eq!(
            storage.list(Path::new("v1")).unwrap(),
            vec![Entry::dir("guides")]
        );
        assert_eq!(
            storage.list(Path::new("v1/guides")).unwrap(),
            vec![Entry::file("setup.md")]
        );
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let storage = MockStorage::new()
            .with_file("v1/zeta.md", "z")
            .with_dir("v1/alpha")
            .with_file("v1/beta.md", "b");

        let names: Vec<_> = storage
            .list(Path::new("v1"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["zeta.md", "alpha", "beta.md"]);
    }

    #[test]
    fn test_read_and_overwrite() {
        let storage = MockStorage::new().with_file("v1/a.md", "first");
        storage.write_file("v1/a.md", "second");

        assert_eq!(storage.read(Path::new("v1/a.md")).unwrap(), "second");
        assert_eq!(storage.list(Path::new("v1")).unwrap().len(), 1);
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read(Path::new("missing.md")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Mock"));
        assert_eq!(err.path(), Some(Path::new("missing.md")));
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let storage = MockStorage::new().with_file("v1/a.md", "a");

        let err = storage.list(Path::new("v1/a.md")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotADirectory);
    }

    #[test]
    fn test_unreadable_dir() {
        let storage = MockStorage::new()
            .with_unreadable_dir("v1/private")
            .with_file("v1/private/secret.md", "s");

        let err = storage.list(Path::new("v1/private")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::PermissionDenied);
        assert!(storage.is_file(Path::new("v1/private/secret.md")));
    }
}
