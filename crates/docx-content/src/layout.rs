//! Content layout rules shared by every component.

use std::path::{Path, PathBuf};

/// Stem that is never listed as a leaf, in addition to the entry-file stem.
const INDEX_STEM: &str = "index";

/// Naming rules for a content root.
///
/// A content file is a non-hidden file named `<stem>.<ext>` for one of
/// [`extensions`](Self::extensions); earlier extensions take priority when the
/// same stem exists more than once in a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentLayout {
    /// URL prefix for every href (e.g. `/docs`). Empty for none.
    pub href_prefix: String,
    /// Stem of the file that supplies a directory's own page.
    pub entry_file: String,
    /// Extensions without dots, highest priority first.
    pub extensions: Vec<String>,
    /// Any entry whose name contains this marker is hidden.
    pub hidden_marker: String,
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            href_prefix: "/docs".to_owned(),
            entry_file: "main".to_owned(),
            extensions: vec!["mdx".to_owned(), "md".to_owned()],
            hidden_marker: ".hidden".to_owned(),
        }
    }
}

/// A content file name split into stem and extension priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ContentName<'a> {
    pub stem: &'a str,
    /// Index into [`ContentLayout::extensions`]; lower wins.
    pub rank: usize,
}

impl ContentLayout {
    /// Whether an entry is excluded from every scan.
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with('.') || (!self.hidden_marker.is_empty() && name.contains(&self.hidden_marker))
    }

    /// Whether a stem is reserved and never listed as a leaf.
    #[must_use]
    pub fn is_reserved(&self, stem: &str) -> bool {
        stem == self.entry_file || stem == INDEX_STEM
    }

    /// Split a file name into stem and extension rank if it is content.
    pub(crate) fn content_name<'a>(&self, name: &'a str) -> Option<ContentName<'a>> {
        self.extensions.iter().enumerate().find_map(|(rank, ext)| {
            let stem = name.strip_suffix(ext.as_str())?.strip_suffix('.')?;
            (!stem.is_empty()).then_some(ContentName { stem, rank })
        })
    }

    /// Whether a file name is a content file (hidden names are not).
    #[must_use]
    pub fn is_content_file(&self, name: &str) -> bool {
        !self.is_hidden(name) && self.content_name(name).is_some()
    }

    /// `dir/<stem>.<ext>` for every extension, in priority order.
    pub(crate) fn file_candidates<'a>(
        &'a self,
        dir: &'a Path,
        stem: &'a str,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        self.extensions
            .iter()
            .map(move |ext| dir.join(format!("{stem}.{ext}")))
    }

    /// `dir/<entry>.<ext>` for every extension, in priority order.
    pub(crate) fn entry_candidates<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
        self.file_candidates(dir, &self.entry_file)
    }

    /// Navigation href for a slug path within a version.
    #[must_use]
    pub fn href<S: AsRef<str>>(&self, version: &str, slugs: &[S]) -> String {
        let mut href = format!("{}/{version}", self.href_prefix);
        for slug in slugs {
            href.push('/');
            href.push_str(slug.as_ref());
        }
        href
    }
}
