//! Extension trait for [`CacheBucket`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_json`/`set_json` for serde-serializable types. Implemented
/// as default methods on an extension trait so [`CacheBucket`] stays
/// object-safe and implementors only handle raw bytes.
///
/// # Example
///
/// ```
/// use docx_cache::{Cache, CacheBucketExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("versions");
///
/// bucket.set_json("all", &vec!["v1".to_owned(), "v2".to_owned()]);
/// let versions: Option<Vec<String>> = bucket.get_json("all");
/// assert_eq!(versions.unwrap().len(), 2);
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss or deserialization failure. A value that
    /// no longer deserializes is treated as a miss and logged.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, &bytes);
        }
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
