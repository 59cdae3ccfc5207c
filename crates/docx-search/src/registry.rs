//! Named backend factories.

use crate::backend::{SearchBackend, SearchError};
use crate::index::IndexBackend;
use crate::local::LocalBackend;

/// Constructor for a fresh, uninitialized backend.
pub type BackendFactory = fn() -> Box<dyn SearchBackend>;

/// Maps backend names to factories.
///
/// # Example
///
/// ```
/// use docx_search::BackendRegistry;
///
/// let registry = BackendRegistry::with_defaults();
/// let backend = registry.create("local").unwrap();
/// assert_eq!(backend.name(), "local");
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    factories: Vec<(String, BackendFactory)>,
}

impl BackendRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled `local` and `index` backends.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with_backend("local", || Box::new(LocalBackend::new()))
            .with_backend("index", || Box::new(IndexBackend::new()))
    }

    /// Register a backend factory. A later registration replaces an earlier one
    /// with the same name.
    #[must_use]
    pub fn with_backend(mut self, name: impl Into<String>, factory: BackendFactory) -> Self {
        let name = name.into();
        if let Some(slot) = self.factories.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = factory;
        } else {
            self.factories.push((name, factory));
        }
        self
    }

    /// Instantiate the backend registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownBackend`] if nothing is registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn SearchBackend>, SearchError> {
        self.factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| SearchError::UnknownBackend {
                name: name.to_owned(),
                available: self.names().join(", "),
            })
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use docx_content::SearchableDoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::{SearchOptions, SearchResult};

    struct EmptyBackend;

    impl SearchBackend for EmptyBackend {
        fn name(&self) -> &'static str {
            "empty"
        }

        fn initialize(&mut self, _corpus: Vec<SearchableDoc>) {}

        fn search(&self, _query: &str, _options: &SearchOptions) -> Vec<SearchResult> {
            Vec::new()
        }

        fn versions(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_defaults() {
        let registry = BackendRegistry::with_defaults();

        assert_eq!(registry.names(), vec!["local", "index"]);
        assert_eq!(registry.create("index").unwrap().name(), "index");
    }

    #[test]
    fn test_unknown_backend() {
        let registry = BackendRegistry::with_defaults();

        let err = registry.create("algolia").err().unwrap();

        assert_eq!(
            err.to_string(),
            "Unknown search backend 'algolia' (available: local, index)"
        );
    }

    #[test]
    fn test_custom_backend() {
        let registry = BackendRegistry::new().with_backend("empty", || Box::new(EmptyBackend));

        assert_eq!(registry.create("empty").unwrap().name(), "empty");
        assert!(registry.create("local").is_err());
    }

    #[test]
    fn test_replace_backend() {
        let registry = BackendRegistry::with_defaults().with_backend("local", || Box::new(EmptyBackend));

        assert_eq!(registry.names(), vec!["local", "index"]);
        assert_eq!(registry.create("local").unwrap().name(), "empty");
    }
}
