//! Search backend trait and shared types.

use std::cmp::Ordering;

use docx_content::SearchableDoc;
use serde::{Deserialize, Serialize};

/// Field weights shared by the bundled backends.
pub(crate) const TITLE_WEIGHT: u32 = 10;
pub(crate) const KEYWORDS_WEIGHT: u32 = 8;
pub(crate) const DESCRIPTION_WEIGHT: u32 = 5;
pub(crate) const CONTENT_WEIGHT: u32 = 1;

/// Version filter value meaning "every version".
const ALL_VERSIONS: &str = "all";

/// Query options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results. `None` returns every match.
    pub limit: Option<usize>,
    /// Restrict results to one version. `None` or `"all"` means no filter.
    pub version: Option<String>,
}

impl SearchOptions {
    /// Version to filter on, if any.
    #[must_use]
    pub fn version_filter(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty() && *v != ALL_VERSIONS)
    }
}

/// A scored match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub href: String,
    pub version: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub score: u32,
}

impl SearchResult {
    pub(crate) fn from_doc(doc: &SearchableDoc, score: u32) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            description: doc.description.clone(),
            href: doc.href.clone(),
            version: doc.version.clone(),
            keywords: doc.keywords.clone(),
            score,
        }
    }
}

/// Error returned by search backend selection.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No backend is registered under the requested name.
    #[error("Unknown search backend '{name}' (available: {available})")]
    UnknownBackend {
        /// Requested name.
        name: String,
        /// Comma-separated registered names.
        available: String,
    },
}

/// A search strategy over the corpus.
///
/// Backends are initialized once with the full corpus and then queried any
/// number of times. Blank queries return nothing, and query terms shorter
/// than two characters are ignored.
pub trait SearchBackend: Send + Sync {
    /// Registry name of this backend.
    fn name(&self) -> &'static str;

    /// Replace the indexed corpus.
    fn initialize(&mut self, corpus: Vec<SearchableDoc>);

    /// Matches for `query`, best first.
    fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult>;

    /// Distinct versions present in the corpus, in corpus order.
    fn versions(&self) -> Vec<String>;
}

/// Sort by score descending then id, apply the version filter, then the limit.
pub(crate) fn finish(mut results: Vec<SearchResult>, options: &SearchOptions) -> Vec<SearchResult> {
    if let Some(version) = options.version_filter() {
        results.retain(|r| r.version == version);
    }
    results.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.id.cmp(&b.id),
        ord => ord,
    });
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}

/// Distinct versions of `docs` in first-seen order.
pub(crate) fn distinct_versions<'a>(docs: impl IntoIterator<Item = &'a SearchableDoc>) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();
    for doc in docs {
        if !versions.contains(&doc.version) {
            versions.push(doc.version.clone());
        }
    }
    versions
}
