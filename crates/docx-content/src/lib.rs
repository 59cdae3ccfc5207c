//! Versioned documentation content engine.
//!
//! Turns a content root laid out as `<root>/<version>/...` into navigation
//! trees, resolvable documents with prev/next links, and a flat search corpus.
//!
//! # Components
//!
//! - [`VersionRegistry`]: version directories in natural order
//! - [`ContentTreeScanner`]: hidden/pruning/priority rules over raw listings
//! - [`NavigationTreeBuilder`]: ordered [`DocNode`] trees per version
//! - [`DocResolver`]: slug to [`DocFile`]
//! - [`flatten`] / [`paginate`]: reading order and [`Pagination`]
//! - [`SearchIndexBuilder`]: [`SearchableDoc`] corpus over every version
//! - [`Site`]: cached facade over all of the above
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docx_cache::NullCache;
//! use docx_content::{ContentLayout, Site};
//! use docx_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content/docs")));
//! let site = Site::new(storage, Arc::new(NullCache), ContentLayout::default());
//!
//! for version in site.versions() {
//!     let tree = site.navigation(&version);
//! }
//! ```

mod layout;
mod navigation;
mod pagination;
mod resolver;
mod scanner;
mod search;
mod site;
mod source;
mod versions;

pub use layout::ContentLayout;
pub use navigation::{DEFAULT_ORDER, DocNode, NavigationError, NavigationTreeBuilder, SlugCollision};
pub use pagination::{FlatNavEntry, Pagination, flatten, paginate};
pub use resolver::{DocFile, DocResolver, ResolveError};
pub use scanner::{ContentFile, ContentTreeScanner, DocEntry, ScanEntry};
pub use search::{SearchIndexBuilder, SearchableDoc};
pub use site::Site;
pub use versions::{VersionRegistry, natural_cmp};
