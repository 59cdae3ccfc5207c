//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing directories, reading files,
//! and inspecting entries, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are **relative to the storage root**:
//! - `""` - the content root itself
//! - `"v1"` - a version directory
//! - `"v1/guides/setup.md"` - a content file
//!
//! Absolute paths and `..` components are rejected by backends that map onto a
//! real filesystem.

use std::path::{Path, PathBuf};

/// Kind of a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file (symlinks are followed).
    File,
    /// Directory (symlinks are followed).
    Dir,
}

/// A single entry returned by [`Storage::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Entry name (last path component).
    pub name: String,
    /// Whether this entry is a file or a directory.
    pub kind: EntryKind,
}

impl Entry {
    /// Create a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    /// True if this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// True if this entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Entry does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes the storage root or is otherwise malformed.
    InvalidPath,
    /// A directory operation was attempted on a file.
    NotADirectory,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path the error refers to, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend that produced the error, if known.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// True if the error means the entry does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::NotADirectory => StorageErrorKind::NotADirectory,
            std::io::ErrorKind::InvalidInput => StorageErrorKind::InvalidPath,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: v1/guides)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::NotADirectory => "Not a directory",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only file provider over a content tree.
///
/// Implementations must be safe to call from several threads at once: the
/// content core scans sibling directories in parallel.
pub trait Storage: Send + Sync {
    /// List the entries of a directory, in the backend's enumeration order.
    ///
    /// The order returned here is the tie-break order used when sorting
    /// navigation entries, so backends must return it deterministically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory is missing, unreadable, or
    /// not a directory.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Inspect an entry without reading it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if nothing
    /// exists at `path`.
    fn stat(&self, path: &Path) -> Result<EntryKind, StorageError>;

    /// Check if a regular file exists at `path`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn is_file(&self, path: &Path) -> bool {
        matches!(self.stat(path), Ok(EntryKind::File))
    }

    /// Check if a directory exists at `path`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.stat(path), Ok(EntryKind::Dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("setup.md");
        let dir = Entry::dir("guides");

        assert!(file.is_file());
        assert!(!file.is_dir());
        assert!(dir.is_dir());
        assert_eq!(dir.name, "guides");
    }

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert!(err.path().is_none());
        assert!(err.backend().is_none());
        assert!(err.is_not_found());
    }

    #[test]
    fn test_storage_error_with_path_and_backend() {
        let err = StorageError::new(StorageErrorKind::InvalidPath)
            .with_path("v1/../secret")
            .with_backend("Fs");

        assert_eq!(err.path(), Some(Path::new("v1/../secret")));
        assert_eq!(err.backend(), Some("Fs"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_storage_error_io_kinds() {
        let cases = [
            (std::io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (
                std::io::ErrorKind::PermissionDenied,
                StorageErrorKind::PermissionDenied,
            ),
            (
                std::io::ErrorKind::NotADirectory,
                StorageErrorKind::NotADirectory,
            ),
            (std::io::ErrorKind::Interrupted, StorageErrorKind::Other),
        ];

        for (io_kind, expected) in cases {
            let err = StorageError::io(std::io::Error::new(io_kind, "boom"), None);
            assert_eq!(err.kind(), expected, "io kind {io_kind:?}");
        }
    }

    #[test]
    fn test_storage_error_source_is_kept() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::io(io_err, Some(PathBuf::from("v1/a.md")));

        assert!(err.source().is_some());
        assert_eq!(err.path(), Some(Path::new("v1/a.md")));
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::new(StorageErrorKind::PermissionDenied)
            .with_backend("Fs")
            .with_path("v1/private")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Permission denied: access denied (path: v1/private)"
        );
    }

    static_assertions::assert_impl_all!(StorageError: Send, Sync);
    static_assertions::assert_obj_safe!(Storage);
}
