//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading a content tree from the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a directory.
///
/// Directory listings are sorted by entry name so that enumeration order is
/// identical across platforms (`read_dir` order is unspecified). Symlinks are
/// followed when classifying entries.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use docx_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content/docs"));
/// let body = storage.read(Path::new("v1/guides/setup.md"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    ///
    /// The root does not have to exist; operations on a missing root report
    /// [`StorageErrorKind::NotFound`].
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a root-relative path to a filesystem path.
    ///
    /// Rejects absolute paths and `..` components to keep every access inside
    /// the root.
    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        let mut resolved = self.root.clone();
        for component in path.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::new(StorageErrorKind::InvalidPath)
                        .with_path(path)
                        .with_backend(BACKEND));
                }
            }
        }
        Ok(resolved)
    }

    /// Classify a directory entry, following symlinks.
    fn entry_kind(entry: &fs::DirEntry) -> Option<EntryKind> {
        let file_type = entry.file_type().ok()?;
        let is_dir = if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) => meta.is_dir(),
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "Skipping dangling symlink");
                    return None;
                }
            }
        } else {
            file_type.is_dir()
        };
        Some(if is_dir {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let full = self.resolve(dir)?;
        let read_dir = fs::read_dir(&full)
            .map_err(|e| StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND))?;

        let mut entries: Vec<Entry> = read_dir
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let kind = Self::entry_kind(&entry)?;
                Some(Entry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    fn stat(&self, path: &Path) -> Result<EntryKind, StorageError> {
        let full = self.resolve(path)?;
        let meta = fs::metadata(&full)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        Ok(if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }
}
