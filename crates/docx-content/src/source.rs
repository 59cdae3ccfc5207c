//! Reading content files into front matter and body.

use std::path::Path;

use docx_meta::{FrontMatter, split_front_matter};
use docx_storage::{Storage, StorageError};

/// A content file split into parsed front matter and raw body.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub meta: FrontMatter,
    pub body: String,
}

impl Source {
    /// Split and parse file text.
    ///
    /// Malformed front matter is logged and replaced by defaults; the block is
    /// still removed from the body.
    pub(crate) fn parse(text: &str, path: &Path) -> Self {
        let (yaml, body) = split_front_matter(text);
        let meta = match yaml.map(FrontMatter::from_yaml) {
            None => FrontMatter::default(),
            Some(Ok(meta)) => meta,
            Some(Err(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse front matter");
                FrontMatter::default()
            }
        };
        Self {
            meta,
            body: body.to_owned(),
        }
    }

    /// Read and parse a file from storage.
    pub(crate) fn load(storage: &dyn Storage, path: &Path) -> Result<Self, StorageError> {
        let text = storage.read(path)?;
        Ok(Self::parse(&text, path))
    }

    /// Read only the front matter, falling back to defaults on any failure.
    pub(crate) fn front_matter(storage: &dyn Storage, path: &Path) -> FrontMatter {
        match Self::load(storage, path) {
            Ok(source) => source.meta,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read content file");
                FrontMatter::default()
            }
        }
    }
}
