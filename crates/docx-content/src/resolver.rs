//! Document resolution by slug.

use std::path::{Path, PathBuf};

use docx_meta::{FrontMatter, Heading, extract_headings, slugify};
use docx_storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};

use crate::layout::ContentLayout;
use crate::scanner::ContentTreeScanner;
use crate::source::Source;
use crate::versions::{VersionRegistry, is_plain_segment};

/// A resolved document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFile {
    /// Slug segments as requested.
    pub slug: Vec<String>,
    /// Resolved path relative to the content root.
    pub path: PathBuf,
    /// Navigation href of the document.
    pub href: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body with the front matter removed, otherwise unprocessed.
    pub raw_content: String,
    pub headings: Vec<Heading>,
    /// Parsed front matter, including keys not interpreted here.
    pub metadata: FrontMatter,
}

/// Error returned when a document cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No content file matches the slug.
    #[error("Document not found: {version}/{slug}")]
    NotFound {
        /// Requested version.
        version: String,
        /// Requested slug joined with `/`.
        slug: String,
    },
    /// A slug segment is empty, `.`/`..`, or contains a path separator.
    #[error("Invalid slug segment: {0:?}")]
    InvalidSlug(String),
    /// The document exists but could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ResolveError {
    /// Whether the error means "no such document" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidSlug(_))
    }
}

/// Finds and loads single documents.
pub struct DocResolver<'a> {
    storage: &'a dyn Storage,
    layout: &'a ContentLayout,
    scanner: ContentTreeScanner<'a>,
}

impl<'a> DocResolver<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, layout: &'a ContentLayout) -> Self {
        Self {
            storage,
            layout,
            scanner: ContentTreeScanner::new(storage, layout),
        }
    }

    /// Resolve `slug` within `version`.
    ///
    /// With `name` as the last segment and `dir` the ones before it, the
    /// candidates are `dir/name.<ext>` for each extension, then
    /// `dir/name/<entry>.<ext>`. When none exists, segments are matched against
    /// the slugs of the directory entries, so every navigation href resolves.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidSlug`] for unsafe segments
    /// - [`ResolveError::NotFound`] for an empty slug, unknown version, or no match
    /// - [`ResolveError::Storage`] if the matched file cannot be read
    pub fn resolve<S: AsRef<str>>(&self, version: &str, slug: &[S]) -> Result<DocFile, ResolveError> {
        let slug: Vec<String> = slug.iter().map(|s| s.as_ref().to_owned()).collect();
        let not_found = || ResolveError::NotFound {
            version: version.to_owned(),
            slug: slug.join("/"),
        };

        if let Some(bad) = slug.iter().find(|s| !is_plain_segment(s)) {
            return Err(ResolveError::InvalidSlug(bad.clone()));
        }
        if slug.is_empty()
            || slug.iter().any(|s| self.layout.is_hidden(s))
            || !VersionRegistry::new(self.storage, self.layout).contains(version)
        {
            return Err(not_found());
        }

        let path = self
            .direct_match(version, &slug)
            .or_else(|| self.slug_match(version, &slug))
            .ok_or_else(not_found)?;

        let source = Source::load(self.storage, &path)?;
        let slugs: Vec<String> = slug.iter().map(|s| slugify(s)).collect();
        let title = source
            .meta
            .title()
            .map_or_else(|| slug.last().cloned().unwrap_or_default(), str::to_owned);

        Ok(DocFile {
            href: self.layout.href(version, &slugs),
            path,
            title,
            description: source.meta.description.clone(),
            headings: extract_headings(&source.body),
            raw_content: source.body,
            metadata: source.meta,
            slug,
        })
    }

    /// The four fixed candidates, checked by exact name.
    fn direct_match(&self, version: &str, slug: &[String]) -> Option<PathBuf> {
        let (name, parents) = slug.split_last()?;
        let mut dir = PathBuf::from(version);
        dir.extend(parents);
        self.first_file(&dir, name)
    }

    /// Walk the segments matching slugified directory entry names.
    fn slug_match(&self, version: &str, slug: &[String]) -> Option<PathBuf> {
        let (name, parents) = slug.split_last()?;
        let mut dir = PathBuf::from(version);
        for segment in parents {
            let entry = self
                .scanner
                .list_dir(&dir)
                .into_iter()
                .find(|e| e.is_dir() && slugify(&e.name) == *segment)?;
            dir.push(entry.name);
        }

        let entries = self.scanner.list_dir(&dir);
        let file = entries
            .iter()
            .filter(|e| e.is_file())
            .filter_map(|e| {
                let content = self.layout.content_name(&e.name)?;
                (slugify(content.stem) == *name).then_some((content.rank, &e.name))
            })
            .min_by_key(|(rank, _)| *rank);
        if let Some((_, file_name)) = file {
            return Some(dir.join(file_name));
        }

        entries
            .iter()
            .filter(|e| e.is_dir() && slugify(&e.name) == *name)
            .find_map(|e| self.scanner.entry_file(&dir.join(&e.name)))
    }

    fn first_file(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        let subdir = dir.join(name);
        self.layout
            .file_candidates(dir, name)
            .chain(self.layout.entry_candidates(&subdir))
            .find(|path| self.storage.is_file(path))
    }
}

#[cfg(test)]
mod tests {
    use docx_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(storage: &MockStorage, version: &str, slug: &[&str]) -> Result<DocFile, ResolveError> {
        let layout = ContentLayout::default();
        DocResolver::new(storage, &layout).resolve(version, slug)
    }

    #[test]
    fn test_resolve_file_with_front_matter() {
        let storage = MockStorage::new().with_file(
            "v1/guides/setup.md",
            "---\ntitle: Setup\ndescription: Install it\norder: 2\nbadge: new\n---\n# Setup\n\n## Requirements\n",
        );

        let doc = resolve(&storage, "v1", &["guides", "setup"]).unwrap();

        assert_eq!(doc.slug, vec!["guides", "setup"]);
        assert_eq!(doc.path, PathBuf::from("v1/guides/setup.md"));
        assert_eq!(doc.href, "/docs/v1/guides/setup");
        assert_eq!(doc.title, "Setup");
        assert_eq!(doc.description.as_deref(), Some("Install it"));
        assert_eq!(doc.raw_content, "# Setup\n\n## Requirements\n");
        assert_eq!(doc.headings.len(), 1);
        assert_eq!(doc.headings[0].id, "requirements");
        assert_eq!(doc.metadata.order, Some(2));
        assert_eq!(doc.metadata.extra.get("badge"), Some(&serde_json::json!("new")));
    }

    #[test]
    fn test_resolve_primary_extension_first() {
        let storage = MockStorage::new()
            .with_file("v1/setup.md", "md")
            .with_file("v1/setup.mdx", "mdx");

        let doc = resolve(&storage, "v1", &["setup"]).unwrap();

        assert_eq!(doc.path, PathBuf::from("v1/setup.mdx"));
        assert_eq!(doc.raw_content, "mdx");
    }

    #[test]
    fn test_resolve_file_before_directory_entry() {
        let storage = MockStorage::new()
            .with_file("v1/guides.md", "file")
            .with_file("v1/guides/main.mdx", "entry");

        let doc = resolve(&storage, "v1", &["guides"]).unwrap();

        assert_eq!(doc.path, PathBuf::from("v1/guides.md"));
    }

    #[test]
    fn test_resolve_directory_entry_file() {
        let storage = MockStorage::new().with_file("v1/guides/main.md", "Overview");

        let doc = resolve(&storage, "v1", &["guides"]).unwrap();

        assert_eq!(doc.path, PathBuf::from("v1/guides/main.md"));
        assert_eq!(doc.href, "/docs/v1/guides");
        assert_eq!(doc.title, "guides");
    }

    #[test]
    fn test_resolve_by_slugified_names() {
        let storage = MockStorage::new()
            .with_file("v1/Getting Started/First Steps.md", "---\ntitle: First\n---\n")
            .with_file("v1/API Reference/main.mdx", "");

        let doc = resolve(&storage, "v1", &["getting-started", "first-steps"]).unwrap();
        let section = resolve(&storage, "v1", &["api-reference"]).unwrap();

        assert_eq!(doc.path, PathBuf::from("v1/Getting Started/First Steps.md"));
        assert_eq!(doc.href, "/docs/v1/getting-started/first-steps");
        assert_eq!(section.path, PathBuf::from("v1/API Reference/main.mdx"));
    }

    #[test]
    fn test_raw_names_resolve_and_href_is_slugged() {
        let storage = MockStorage::new().with_file("v1/Getting Started/First Steps.md", "");

        let doc = resolve(&storage, "v1", &["Getting Started", "First Steps"]).unwrap();

        assert_eq!(doc.href, "/docs/v1/getting-started/first-steps");
        assert_eq!(doc.title, "First Steps");
    }

    #[test]
    fn test_not_found_cases() {
        let storage = MockStorage::new()
            .with_file("v1/a.md", "")
            .with_file("v1/drafts.hidden/b.md", "");

        for (version, slug) in [
            ("v1", vec!["missing"]),
            ("v1", vec![]),
            ("v2", vec!["a"]),
            ("v1", vec!["drafts.hidden", "b"]),
        ] {
            let err = resolve(&storage, version, &slug).unwrap_err();
            assert!(
                matches!(err, ResolveError::NotFound { .. }),
                "{version}/{slug:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_unsafe_segments_are_invalid() {
        let storage = MockStorage::new().with_file("v1/a.md", "");

        for slug in [vec![".."], vec!["a", "."], vec!["", "a"], vec!["x/y"]] {
            let err = resolve(&storage, "v1", &slug).unwrap_err();
            assert!(matches!(err, ResolveError::InvalidSlug(_)), "{slug:?}");
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_malformed_front_matter_is_stripped() {
        let storage = MockStorage::new().with_file("v1/bad.md", "---\ntitle: [oops\n---\nBody text");

        let doc = resolve(&storage, "v1", &["bad"]).unwrap();

        assert_eq!(doc.title, "bad");
        assert_eq!(doc.raw_content, "Body text");
        assert_eq!(doc.metadata, FrontMatter::default());
    }

    #[test]
    fn test_headings_skip_code_blocks() {
        let storage = MockStorage::new().with_file(
            "v1/a.md",
            "## One\n```sh\n## comment\n```\n#### Two\n##### Five\n",
        );

        let doc = resolve(&storage, "v1", &["a"]).unwrap();

        let texts: Vec<_> = doc.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_read_failure_propagates() {
        struct BrokenRead(MockStorage);

        impl Storage for BrokenRead {
            fn list(&self, dir: &Path) -> Result<Vec<docx_storage::Entry>, StorageError> {
                self.0.list(dir)
            }
            fn read(&self, path: &Path) -> Result<String, StorageError> {
                Err(StorageError::new(StorageErrorKind::PermissionDenied).with_path(path))
            }
            fn stat(&self, path: &Path) -> Result<docx_storage::EntryKind, StorageError> {
                self.0.stat(path)
            }
        }

        let storage = BrokenRead(MockStorage::new().with_file("v1/a.md", ""));
        let layout = ContentLayout::default();

        let err = DocResolver::new(&storage, &layout)
            .resolve("v1", &["a"])
            .unwrap_err();

        assert!(matches!(err, ResolveError::Storage(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_serialize_camel_case() {
        let storage = MockStorage::new().with_file("v1/a.md", "Body");

        let doc = resolve(&storage, "v1", &["a"]).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["rawContent"], "Body");
        assert!(json.get("description").is_none());
        assert_eq!(json["metadata"], serde_json::json!({}));
    }
}
