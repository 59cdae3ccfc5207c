//! File provider abstraction for the DocX content engine.
//!
//! This crate provides a [`Storage`] trait that hides how content files are
//! listed, read, and inspected. The content core only ever talks to this trait,
//! which enables:
//!
//! - **Unit testing** against in-memory fixture trees instead of real disk I/O
//! - **Backend flexibility** (local filesystem today, anything tree-shaped later)
//! - **Clean separation** between tree/ordering logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()`, `read()`, and `stat()` methods
//! - [`FsStorage`] implementation rooted at a directory on disk
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use docx_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content/docs"));
//! for entry in storage.list(Path::new("v1"))? {
//!     println!("{} ({:?})", entry.name, entry.kind);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};
