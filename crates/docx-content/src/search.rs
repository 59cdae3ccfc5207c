//! Search corpus construction.

use docx_meta::{humanize, plain_text};
use docx_storage::Storage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::ContentLayout;
use crate::scanner::{ContentFile, ContentTreeScanner};
use crate::source::Source;
use crate::versions::VersionRegistry;

/// One document of the search corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableDoc {
    /// `<version>-<slug path>`, unique across the corpus.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Plain text of the body.
    pub content: String,
    pub version: String,
    pub href: String,
}

/// Builds the flat search corpus over every version.
pub struct SearchIndexBuilder<'a> {
    storage: &'a dyn Storage,
    layout: &'a ContentLayout,
}

impl<'a> SearchIndexBuilder<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, layout: &'a ContentLayout) -> Self {
        Self { storage, layout }
    }

    /// Corpus of every version, versions in registry order and files in walk
    /// order. Files that cannot be read are logged and skipped.
    pub fn build_corpus(&self) -> Vec<SearchableDoc> {
        let versions = VersionRegistry::new(self.storage, self.layout).list_versions();
        let corpus: Vec<SearchableDoc> = versions
            .par_iter()
            .map(|version| self.build_version(version))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();
        tracing::info!(
            versions = versions.len(),
            documents = corpus.len(),
            "Built search corpus"
        );
        corpus
    }

    /// Corpus of a single version.
    pub fn build_version(&self, version: &str) -> Vec<SearchableDoc> {
        ContentTreeScanner::new(self.storage, self.layout)
            .walk(version)
            .par_iter()
            .filter_map(|file| self.document(version, file))
            .collect()
    }

    fn document(&self, version: &str, file: &ContentFile) -> Option<SearchableDoc> {
        let source = match Source::load(self.storage, &file.path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "Skipping unreadable document");
                return None;
            }
        };

        let slugs = file.slugs();
        let title = source
            .meta
            .title()
            .map_or_else(|| humanize(file.stem()), str::to_owned);

        Some(SearchableDoc {
            id: format!("{version}-{}", slugs.join("/")),
            href: self.layout.href(version, &slugs),
            title,
            description: source.meta.description,
            keywords: source.meta.keywords,
            content: plain_text(&source.body),
            version: version.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use docx_storage::{Entry, EntryKind, MockStorage, StorageError, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn corpus(storage: &MockStorage) -> Vec<SearchableDoc> {
        let layout = ContentLayout::default();
        SearchIndexBuilder::new(storage, &layout).build_corpus()
    }

    #[test]
    fn test_document_fields() {
        let storage = MockStorage::new().with_file(
            "v1/guides/setup.mdx",
            "---\ntitle: Setup\ndescription: Install\nkeywords: cli, install\n---\nimport X from 'x'\n\n## Steps\n\nRun **it** &amp; <b>wait</b>.\n",
        );

        assert_eq!(
            corpus(&storage),
            vec![SearchableDoc {
                id: "v1-guides/setup".to_owned(),
                title: "Setup".to_owned(),
                description: Some("Install".to_owned()),
                keywords: vec!["cli".to_owned(), "install".to_owned()],
                content: "Steps Run it & wait.".to_owned(),
                version: "v1".to_owned(),
                href: "/docs/v1/guides/setup".to_owned(),
            }]
        );
    }

    #[test]
    fn test_title_fallback_humanizes_stem() {
        let storage = MockStorage::new().with_file("v1/quick-start.md", "Body");

        let docs = corpus(&storage);

        assert_eq!(docs[0].title, "quick start");
        assert_eq!(docs[0].description, None);
        assert!(docs[0].keywords.is_empty());
    }

    #[test]
    fn test_ids_and_hrefs_match_navigation_slugs() {
        let storage = MockStorage::new().with_file("v1/Getting Started/First Steps.md", "");

        let docs = corpus(&storage);

        assert_eq!(docs[0].id, "v1-getting-started/first-steps");
        assert_eq!(docs[0].href, "/docs/v1/getting-started/first-steps");
    }

    #[test]
    fn test_versions_in_registry_order_and_files_in_walk_order() {
        let storage = MockStorage::new()
            .with_file("v10/a.md", "")
            .with_file("v2/b.md", "")
            .with_file("v2/a.md", "")
            .with_file("v1/z.md", "");

        let ids: Vec<_> = corpus(&storage).into_iter().map(|d| d.id).collect();

        assert_eq!(ids, vec!["v1-z", "v2-b", "v2-a", "v10-a"]);
    }

    #[test]
    fn test_excludes_hidden_and_reserved() {
        let storage = MockStorage::new()
            .with_file("v1/internal.hidden/secret.md", "")
            .with_file("v1/guides/main.md", "")
            .with_file("v1/guides/index.md", "")
            .with_file("v1/guides/ok.md", "")
            .with_file("v2/drafts.hidden/nested/deep.md", "")
            .with_file("v2/.cache/x.md", "")
            .with_file("v2/visible.md", "");

        let ids: Vec<_> = corpus(&storage).into_iter().map(|d| d.id).collect();

        assert_eq!(ids, vec!["v1-guides/ok", "v2-visible"]);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        struct FailingReads(MockStorage);

        impl Storage for FailingReads {
            fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
                self.0.list(dir)
            }
            fn read(&self, path: &Path) -> Result<String, StorageError> {
                if path.ends_with("broken.md") {
                    return Err(StorageError::new(StorageErrorKind::Other).with_path(path));
                }
                self.0.read(path)
            }
            fn stat(&self, path: &Path) -> Result<EntryKind, StorageError> {
                self.0.stat(path)
            }
        }

        let storage = FailingReads(
            MockStorage::new()
                .with_file("v1/broken.md", "")
                .with_file("v1/fine.md", ""),
        );
        let layout = ContentLayout::default();

        let docs = SearchIndexBuilder::new(&storage, &layout).build_corpus();

        let ids: Vec<_> = docs.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["v1-fine"]);
    }

    #[test]
    fn test_empty_root() {
        assert!(corpus(&MockStorage::new()).is_empty());
    }
}
