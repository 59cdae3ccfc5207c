//! Cache abstraction layer for DocX.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! from the underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with explicit invalidation
//!
//! Entries never expire on their own. They are dropped only through
//! [`CacheBucket::remove`], [`CacheBucket::clear`], or process restart.
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: Process-local in-memory implementation
//!
//! # Example
//!
//! ```
//! use docx_cache::{Cache, NullCache};
//!
//! let cache = NullCache;
//! let bucket = cache.bucket("navigation");
//! bucket.set("v1", b"[]");
//! assert_eq!(bucket.get("v1"), None); // NullCache always misses
//! ```

mod ext;
mod memory;

pub use ext::CacheBucketExt;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores raw byte values under string keys.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value, or `None` on cache miss.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value, overwriting any existing entry for the same key.
    fn set(&self, key: &str, value: &[u8]);

    /// Drop a single entry. Missing keys are ignored.
    fn remove(&self, key: &str);

    /// Drop every entry in this bucket.
    fn clear(&self);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name returns handles
    /// that share the same underlying storage.
    ///
    /// # Arguments
    ///
    /// * `name` - Bucket name (e.g., "versions", "navigation")
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
///
/// Every `get` returns `None`; every write is silently discarded.
/// Used as the bucket type for [`NullCache`].
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8]) {}

    fn remove(&self, _key: &str) {}

    fn clear(&self) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled. All operations are no-ops and all lookups
/// return `None`.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
