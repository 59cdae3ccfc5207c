//! Pluggable search over the documentation corpus.
//!
//! A [`SearchBackend`] is initialized with the [`SearchableDoc`] corpus built
//! by `docx-content` and answers ranked queries. Two backends are bundled:
//!
//! - [`LocalBackend`] (`local`): substring and edit-distance matching via
//!   `strsim`, scanned per query
//! - [`IndexBackend`] (`index`): in-RAM tantivy index with fuzzy term queries,
//!   built up front
//!
//! Both tolerate small typos, weight matches by field (title, keywords,
//! description, content) and require every query term to match.
//! [`BackendRegistry`] selects a backend by its configured name.
//!
//! [`SearchableDoc`]: docx_content::SearchableDoc

mod backend;
mod index;
mod local;
mod registry;
mod tokenize;

pub use backend::{SearchBackend, SearchError, SearchOptions, SearchResult};
pub use index::IndexBackend;
pub use local::LocalBackend;
pub use registry::{BackendFactory, BackendRegistry};
