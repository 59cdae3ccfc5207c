//! Version enumeration.

use std::cmp::Ordering;
use std::path::Path;

use docx_storage::Storage;

use crate::layout::ContentLayout;

/// Lists the versions available under a content root.
///
/// Each non-hidden directory directly under the root is a version. The list
/// is read fresh from storage on every call.
pub struct VersionRegistry<'a> {
    storage: &'a dyn Storage,
    layout: &'a ContentLayout,
}

impl<'a> VersionRegistry<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, layout: &'a ContentLayout) -> Self {
        Self { storage, layout }
    }

    /// Version identifiers in natural order (`v2` before `v10`).
    ///
    /// A missing root yields an empty list. Any other listing failure is
    /// logged and also yields an empty list.
    pub fn list_versions(&self) -> Vec<String> {
        let entries = match self.storage.list(Path::new("")) {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                tracing::debug!("Content root does not exist");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list content root");
                return Vec::new();
            }
        };

        let mut versions: Vec<String> = entries
            .into_iter()
            .filter(|e| e.is_dir() && !self.layout.is_hidden(&e.name))
            .map(|e| e.name)
            .collect();
        versions.sort_by(|a, b| natural_cmp(a, b));
        versions
    }

    /// Whether `version` names a visible version directory.
    pub fn contains(&self, version: &str) -> bool {
        is_plain_segment(version)
            && !self.layout.is_hidden(version)
            && self.storage.is_dir(Path::new(version))
    }
}

/// A path segment that cannot escape its parent directory.
pub(crate) fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}

/// Compare strings with digit runs ordered by numeric value.
///
/// Non-digit runs compare lexicographically. When two strings are equal under
/// this ordering (e.g. `v01` and `v1`), plain string order decides.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
                    (Chunk::Digits(x), Chunk::Text(y)) | (Chunk::Text(x), Chunk::Digits(y)) => {
                        x.cmp(y)
                    }
                    (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Compare two ASCII digit runs numerically without overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use docx_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sorted(mut items: Vec<&str>) -> Vec<&str> {
        items.sort_by(|a, b| natural_cmp(a, b));
        items
    }

    #[test]
    fn test_natural_order_numeric_runs() {
        assert_eq!(sorted(vec!["v10", "v2", "v1"]), vec!["v1", "v2", "v10"]);
        assert_eq!(
            sorted(vec!["v1.10", "v1.2", "v1.9"]),
            vec!["v1.2", "v1.9", "v1.10"]
        );
    }

    #[test]
    fn test_natural_order_mixed() {
        assert_eq!(
            sorted(vec!["latest", "v2", "2.0", "beta"]),
            vec!["2.0", "beta", "latest", "v2"]
        );
    }

    #[test]
    fn test_natural_order_leading_zeros_tie_break() {
        assert_eq!(sorted(vec!["v1", "v01"]), vec!["v01", "v1"]);
        assert_eq!(natural_cmp("v007", "v7"), Ordering::Less);
    }

    #[test]
    fn test_natural_order_prefix_shorter_first() {
        assert_eq!(natural_cmp("v1", "v1.1"), Ordering::Less);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("v99999999999999999999999", "v100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_list_versions_filters_and_sorts() {
        let storage = MockStorage::new()
            .with_file("v10/a.md", "")
            .with_file("v2/a.md", "")
            .with_dir("v1")
            .with_dir(".git")
            .with_dir("old.hidden")
            .with_file("README.md", "");
        let layout = ContentLayout::default();

        let versions = VersionRegistry::new(&storage, &layout).list_versions();

        assert_eq!(versions, vec!["v1", "v2", "v10"]);
    }

    #[test]
    fn test_list_versions_unreadable_root() {
        let storage = MockStorage::new().with_unreadable_dir("");
        let layout = ContentLayout::default();

        assert!(VersionRegistry::new(&storage, &layout).list_versions().is_empty());
    }

    #[test]
    fn test_list_versions_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = docx_storage::FsStorage::new(dir.path().join("missing"));
        let layout = ContentLayout::default();

        assert!(VersionRegistry::new(&storage, &layout).list_versions().is_empty());
    }

    #[test]
    fn test_contains() {
        let storage = MockStorage::new()
            .with_file("v1/a.md", "")
            .with_file("v2.hidden/a.md", "");
        let layout = ContentLayout::default();
        let registry = VersionRegistry::new(&storage, &layout);

        assert!(registry.contains("v1"));
        assert!(!registry.contains("v2.hidden"));
        assert!(!registry.contains("v3"));
        assert!(!registry.contains("v1/a.md"));
        assert!(!registry.contains(".."));
        assert!(!registry.contains(""));
    }

    #[test]
    fn test_plain_segment() {
        assert!(is_plain_segment("guides"));
        assert!(!is_plain_segment("."));
        assert!(!is_plain_segment("a\\b"));
    }
}
