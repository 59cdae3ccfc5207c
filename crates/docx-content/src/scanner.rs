//! Content tree scanning.
//!
//! The scanner applies the layout rules to raw directory listings: hidden
//! entries are dropped, directories without any content file below them are
//! pruned, reserved stems are skipped, and a stem present with several
//! extensions collapses to the highest-priority one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docx_meta::slugify;
use docx_storage::{Entry, Storage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::ContentLayout;
use crate::versions::is_plain_segment;

/// One visible item of a directory after the layout rules are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEntry {
    /// Subdirectory with at least one content file somewhere below it.
    Dir { name: String },
    /// Content file that is not an entry file.
    File { name: String, stem: String },
}

impl ScanEntry {
    /// Name as stored on disk.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Dir { name } | Self::File { name, .. } => name,
        }
    }

    /// Name the slug is derived from: the directory name or the file stem.
    #[must_use]
    pub fn slug_source(&self) -> &str {
        match self {
            Self::Dir { name } => name,
            Self::File { stem, .. } => stem,
        }
    }

    /// URL slug of this entry.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.slug_source())
    }
}

/// A content file found by a flat walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentFile {
    /// Path relative to the content root (`<version>/...`).
    pub path: PathBuf,
    /// Directory names below the version followed by the file stem.
    pub segments: Vec<String>,
}

impl ContentFile {
    /// Slugified segments, as used in navigation hrefs.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        self.segments.iter().map(|s| slugify(s)).collect()
    }

    /// File stem (last segment).
    #[must_use]
    pub fn stem(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

/// One record per content file of a version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    pub version: String,
    /// Slugified path segments below the version.
    pub slug: Vec<String>,
    pub href: String,
    /// Path relative to the content root.
    pub path: PathBuf,
}

/// Applies the layout rules to storage listings.
pub struct ContentTreeScanner<'a> {
    storage: &'a dyn Storage,
    layout: &'a ContentLayout,
}

impl<'a> ContentTreeScanner<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, layout: &'a ContentLayout) -> Self {
        Self { storage, layout }
    }

    /// Non-hidden entries of `dir` in storage enumeration order.
    ///
    /// A missing directory yields nothing. Other failures are logged and
    /// also yield nothing, so siblings keep scanning.
    pub fn list_dir(&self, dir: &Path) -> Vec<Entry> {
        match self.storage.list(dir) {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| !self.layout.is_hidden(&e.name))
                .collect(),
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to list directory");
                Vec::new()
            }
        }
    }

    /// Whether `dir` or any visible descendant holds a content file.
    pub fn has_content(&self, dir: &Path) -> bool {
        let entries = self.list_dir(dir);
        entries
            .iter()
            .any(|e| e.is_file() && self.layout.content_name(&e.name).is_some())
            || entries
                .iter()
                .any(|e| e.is_dir() && self.has_content(&dir.join(&e.name)))
    }

    /// Entry file of `dir`, highest-priority extension first.
    pub fn entry_file(&self, dir: &Path) -> Option<PathBuf> {
        self.layout
            .entry_candidates(dir)
            .find(|path| self.storage.is_file(path))
    }

    /// Visible items of `dir` in enumeration order.
    ///
    /// Subdirectories are checked for content in parallel.
    pub fn scan_dir(&self, dir: &Path) -> Vec<ScanEntry> {
        let entries = self.list_dir(dir);

        let keep_dir: Vec<bool> = entries
            .par_iter()
            .map(|e| e.is_dir() && self.has_content(&dir.join(&e.name)))
            .collect();

        let mut items: Vec<ScanEntry> = Vec::with_capacity(entries.len());
        let mut by_stem: HashMap<String, (usize, usize)> = HashMap::new();

        for (entry, keep) in entries.iter().zip(keep_dir) {
            if entry.is_dir() {
                if keep {
                    items.push(ScanEntry::Dir {
                        name: entry.name.clone(),
                    });
                }
                continue;
            }
            let Some(content) = self.layout.content_name(&entry.name) else {
                continue;
            };
            if self.layout.is_reserved(content.stem) {
                continue;
            }

            // Same stem seen before: keep the position, take the better extension.
            if let Some(&(index, rank)) = by_stem.get(content.stem) {
                let (kept, ignored) = if content.rank < rank {
                    by_stem.insert(content.stem.to_owned(), (index, content.rank));
                    let previous = std::mem::replace(
                        &mut items[index],
                        ScanEntry::File {
                            name: entry.name.clone(),
                            stem: content.stem.to_owned(),
                        },
                    );
                    (entry.name.clone(), previous.name().to_owned())
                } else {
                    (items[index].name().to_owned(), entry.name.clone())
                };
                tracing::warn!(
                    dir = %dir.display(),
                    kept = %kept,
                    ignored = %ignored,
                    "Same document exists with several extensions"
                );
                continue;
            }

            by_stem.insert(content.stem.to_owned(), (items.len(), content.rank));
            items.push(ScanEntry::File {
                name: entry.name.clone(),
                stem: content.stem.to_owned(),
            });
        }

        items
    }

    /// Every content file of `version` in walk order.
    ///
    /// Directories are expanded in place, so a directory's files come right
    /// after the files that precede it in its parent's listing.
    pub fn walk(&self, version: &str) -> Vec<ContentFile> {
        if !is_plain_segment(version) || self.layout.is_hidden(version) {
            return Vec::new();
        }
        let mut files = Vec::new();
        self.walk_dir(Path::new(version), &mut Vec::new(), &mut files);
        files
    }

    fn walk_dir(&self, dir: &Path, segments: &mut Vec<String>, files: &mut Vec<ContentFile>) {
        for item in self.scan_dir(dir) {
            match item {
                ScanEntry::Dir { name } => {
                    let child = dir.join(&name);
                    segments.push(name);
                    self.walk_dir(&child, segments, files);
                    segments.pop();
                }
                ScanEntry::File { name, stem } => {
                    let mut file_segments = segments.clone();
                    file_segments.push(stem);
                    files.push(ContentFile {
                        path: dir.join(name),
                        segments: file_segments,
                    });
                }
            }
        }
    }

    /// One [`DocEntry`] per content file of `version`.
    pub fn list_documents(&self, version: &str) -> Vec<DocEntry> {
        self.walk(version)
            .into_iter()
            .map(|file| {
                let slug = file.slugs();
                DocEntry {
                    version: version.to_owned(),
                    href: self.layout.href(version, &slug),
                    slug,
                    path: file.path,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use docx_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(items: &[ScanEntry]) -> Vec<&str> {
        items.iter().map(ScanEntry::name).collect()
    }

    #[test]
    fn test_scan_dir_keeps_enumeration_order() {
        let storage = MockStorage::new()
            .with_file("v1/zeta.md", "")
            .with_file("v1/alpha/a.md", "")
            .with_file("v1/beta.mdx", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["zeta.md", "alpha", "beta.mdx"]);
    }

    #[test]
    fn test_scan_dir_skips_hidden_reserved_and_non_content() {
        let storage = MockStorage::new()
            .with_file("v1/main.md", "")
            .with_file("v1/index.mdx", "")
            .with_file("v1/.draft.md", "")
            .with_file("v1/notes.hidden.md", "")
            .with_file("v1/logo.png", "")
            .with_file("v1/intro.md", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(
            items,
            vec![ScanEntry::File {
                name: "intro.md".to_owned(),
                stem: "intro".to_owned()
            }]
        );
    }

    #[test]
    fn test_scan_dir_prunes_directories_without_content() {
        let storage = MockStorage::new()
            .with_file("v1/assets/logo.png", "")
            .with_file("v1/drafts/wip.hidden.md", "")
            .with_dir("v1/empty")
            .with_file("v1/deep/a/b/c.md", "")
            .with_file("v1/internal.hidden/secret.md", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["deep"]);
    }

    #[test]
    fn test_scan_dir_directory_with_only_entry_file_has_content() {
        let storage = MockStorage::new().with_file("v1/guides/main.md", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["guides"]);
    }

    #[test]
    fn test_scan_dir_primary_extension_wins() {
        let storage = MockStorage::new()
            .with_file("v1/setup.md", "")
            .with_file("v1/other.md", "")
            .with_file("v1/setup.mdx", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["setup.mdx", "other.md"]);
    }

    #[test]
    fn test_scan_dir_secondary_after_primary_is_ignored() {
        let storage = MockStorage::new()
            .with_file("v1/setup.mdx", "")
            .with_file("v1/setup.md", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["setup.mdx"]);
    }

    #[test]
    fn test_unreadable_directory_contributes_nothing() {
        let storage = MockStorage::new()
            .with_unreadable_dir("v1/locked")
            .with_file("v1/locked/a.md", "")
            .with_file("v1/open/b.md", "");
        let layout = ContentLayout::default();

        let items = ContentTreeScanner::new(&storage, &layout).scan_dir(Path::new("v1"));

        assert_eq!(names(&items), vec!["open"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let storage = MockStorage::new();
        let layout = ContentLayout::default();

        assert!(ContentTreeScanner::new(&storage, &layout)
            .scan_dir(Path::new("v9"))
            .is_empty());
    }

    #[test]
    fn test_entry_file_priority() {
        let storage = MockStorage::new()
            .with_file("v1/guides/main.md", "")
            .with_file("v1/guides/main.mdx", "")
            .with_file("v1/other/main.md", "");
        let layout = ContentLayout::default();
        let scanner = ContentTreeScanner::new(&storage, &layout);

        assert_eq!(
            scanner.entry_file(Path::new("v1/guides")),
            Some(PathBuf::from("v1/guides/main.mdx"))
        );
        assert_eq!(
            scanner.entry_file(Path::new("v1/other")),
            Some(PathBuf::from("v1/other/main.md"))
        );
        assert_eq!(scanner.entry_file(Path::new("v1")), None);
    }

    #[test]
    fn test_walk_order_and_segments() {
        let storage = MockStorage::new()
            .with_file("v1/intro.md", "")
            .with_file("v1/Getting Started/main.md", "")
            .with_file("v1/Getting Started/First Steps.md", "")
            .with_file("v1/zz.md", "");
        let layout = ContentLayout::default();

        let files = ContentTreeScanner::new(&storage, &layout).walk("v1");

        assert_eq!(
            files,
            vec![
                ContentFile {
                    path: PathBuf::from("v1/intro.md"),
                    segments: vec!["intro".to_owned()],
                },
                ContentFile {
                    path: PathBuf::from("v1/Getting Started/First Steps.md"),
                    segments: vec!["Getting Started".to_owned(), "First Steps".to_owned()],
                },
                ContentFile {
                    path: PathBuf::from("v1/zz.md"),
                    segments: vec!["zz".to_owned()],
                },
            ]
        );
        assert_eq!(files[1].slugs(), vec!["getting-started", "first-steps"]);
        assert_eq!(files[1].stem(), "First Steps");
    }

    #[test]
    fn test_walk_rejects_unsafe_version() {
        let storage = MockStorage::new().with_file("v1/a.md", "");
        let layout = ContentLayout::default();
        let scanner = ContentTreeScanner::new(&storage, &layout);

        assert!(scanner.walk("..").is_empty());
        assert!(scanner.walk("v1/..").is_empty());
        assert!(scanner.walk("").is_empty());
    }

    #[test]
    fn test_documents() {
        let storage = MockStorage::new().with_file("v1/Guides/Quick Start.mdx", "");
        let layout = ContentLayout::default();

        let docs = ContentTreeScanner::new(&storage, &layout).list_documents("v1");

        assert_eq!(
            docs,
            vec![DocEntry {
                version: "v1".to_owned(),
                slug: vec!["guides".to_owned(), "quick-start".to_owned()],
                href: "/docs/v1/guides/quick-start".to_owned(),
                path: PathBuf::from("v1/Guides/Quick Start.mdx"),
            }]
        );
    }
}
