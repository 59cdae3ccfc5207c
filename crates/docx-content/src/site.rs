//! Cached facade over the content components.
//!
//! [`Site`] ties a [`Storage`] backend, a [`ContentLayout`], and an injected
//! [`Cache`] together. Two buckets are used:
//!
//! - `versions`: the version list under a single key
//! - `navigation`: one navigation tree per version, keyed by version
//!
//! Cached entries never expire on their own. Callers drop them with
//! [`Site::invalidate`] or [`Site::invalidate_version`]. Failed builds are
//! never cached. Document resolution, listings, and the search corpus always
//! read storage directly.

use std::sync::Arc;

use docx_cache::{Cache, CacheBucket, CacheBucketExt};
use docx_storage::Storage;

use crate::layout::ContentLayout;
use crate::navigation::{DocNode, NavigationError, NavigationTreeBuilder, SlugCollision};
use crate::pagination::{Pagination, paginate};
use crate::resolver::{DocFile, DocResolver, ResolveError};
use crate::scanner::{ContentTreeScanner, DocEntry};
use crate::search::{SearchIndexBuilder, SearchableDoc};
use crate::versions::VersionRegistry;

const VERSIONS_BUCKET: &str = "versions";
const NAVIGATION_BUCKET: &str = "navigation";
const VERSIONS_KEY: &str = "all";

/// Versioned documentation site.
///
/// `Site` is `Send + Sync`; share it with `Arc<Site>`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use docx_cache::MemoryCache;
/// use docx_content::{ContentLayout, Site};
/// use docx_storage::MockStorage;
///
/// let storage = MockStorage::new()
///     .with_file("v1/guides/intro.md", "---\ntitle: Intro\norder: 1\n---\nHello");
/// let site = Site::new(Arc::new(storage), Arc::new(MemoryCache::new()), ContentLayout::default());
///
/// assert_eq!(site.versions(), vec!["v1"]);
/// let tree = site.navigation("v1").unwrap();
/// assert_eq!(tree[0].children[0].href.as_deref(), Some("/docs/v1/guides/intro"));
/// ```
pub struct Site {
    storage: Arc<dyn Storage>,
    layout: ContentLayout,
    versions_bucket: Box<dyn CacheBucket>,
    navigation_bucket: Box<dyn CacheBucket>,
}

impl Site {
    /// Create a site over `storage`, caching through `cache`.
    ///
    /// Pass [`docx_cache::NullCache`] to disable caching.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn Cache>, layout: ContentLayout) -> Self {
        Self {
            storage,
            layout,
            versions_bucket: cache.bucket(VERSIONS_BUCKET),
            navigation_bucket: cache.bucket(NAVIGATION_BUCKET),
        }
    }

    /// Layout rules this site was created with.
    #[must_use]
    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    /// Available versions in natural order.
    pub fn versions(&self) -> Vec<String> {
        if let Some(versions) = self.versions_bucket.get_json(VERSIONS_KEY) {
            return versions;
        }
        let versions = VersionRegistry::new(self.storage.as_ref(), &self.layout).list_versions();
        self.versions_bucket.set_json(VERSIONS_KEY, &versions);
        versions
    }

    /// Navigation tree of `version`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SlugCollision`] when two siblings share a slug.
    pub fn navigation(&self, version: &str) -> Result<Vec<DocNode>, NavigationError> {
        if let Some(tree) = self.navigation_bucket.get_json(version) {
            return Ok(tree);
        }
        let tree = NavigationTreeBuilder::new(self.storage.as_ref(), &self.layout).build(version)?;
        self.navigation_bucket.set_json(version, &tree);
        Ok(tree)
    }

    /// Every slug collision in `version`.
    pub fn validate(&self, version: &str) -> Vec<SlugCollision> {
        NavigationTreeBuilder::new(self.storage.as_ref(), &self.layout).validate(version)
    }

    /// Resolve a document by slug segments.
    ///
    /// # Errors
    ///
    /// See [`DocResolver::resolve`].
    pub fn resolve<S: AsRef<str>>(&self, version: &str, slug: &[S]) -> Result<DocFile, ResolveError> {
        DocResolver::new(self.storage.as_ref(), &self.layout).resolve(version, slug)
    }

    /// Previous/next links around `current_href` in `version`.
    ///
    /// # Errors
    ///
    /// Propagates navigation build errors.
    pub fn pagination(&self, version: &str, current_href: &str) -> Result<Pagination, NavigationError> {
        Ok(paginate(&self.navigation(version)?, current_href))
    }

    /// Every content file of `version`.
    pub fn documents(&self, version: &str) -> Vec<DocEntry> {
        ContentTreeScanner::new(self.storage.as_ref(), &self.layout).list_documents(version)
    }

    /// Search corpus over every version.
    pub fn search_corpus(&self) -> Vec<SearchableDoc> {
        SearchIndexBuilder::new(self.storage.as_ref(), &self.layout).build_corpus()
    }

    /// Drop every cached version list and navigation tree.
    pub fn invalidate(&self) {
        self.versions_bucket.clear();
        self.navigation_bucket.clear();
        tracing::debug!("Invalidated all cached content");
    }

    /// Drop the cached navigation of `version` and the version list.
    pub fn invalidate_version(&self, version: &str) {
        self.navigation_bucket.remove(version);
        self.versions_bucket.remove(VERSIONS_KEY);
        tracing::debug!(version, "Invalidated cached version");
    }
}
