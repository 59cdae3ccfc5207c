//! Process-local in-memory cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Cache, CacheBucket};

type Entries = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// In-memory [`Cache`] shared by every bucket handle with the same name.
///
/// Contents live until removed explicitly or the process exits. A poisoned
/// lock is treated as an empty cache rather than a panic.
#[derive(Debug, Default)]
pub struct MemoryCache {
    buckets: RwLock<HashMap<String, Entries>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self, name: &str) -> Entries {
        if let Ok(buckets) = self.buckets.read()
            && let Some(entries) = buckets.get(name)
        {
            return Arc::clone(entries);
        }
        match self.buckets.write() {
            Ok(mut buckets) => Arc::clone(buckets.entry(name.to_owned()).or_default()),
            // Detached bucket: behaves like a cache that never hits again.
            Err(_) => Entries::default(),
        }
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryBucket {
            name: name.to_owned(),
            entries: self.entries(name),
        })
    }
}

struct MemoryBucket {
    name: String,
    entries: Entries,
}

impl CacheBucket for MemoryBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let hit = self.entries.read().ok()?.get(key).cloned();
        tracing::debug!(bucket = %self.name, key, hit = hit.is_some(), "Cache lookup");
        hit
    }

    fn set(&self, key: &str, value: &[u8]) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_owned(), value.to_vec());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(MemoryCache: Send, Sync);

    #[test]
    fn test_set_then_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("navigation");

        bucket.set("v1", b"tree");

        assert_eq!(bucket.get("v1"), Some(b"tree".to_vec()));
        assert_eq!(bucket.get("v2"), None);
    }

    #[test]
    fn test_handles_share_storage() {
        let cache = MemoryCache::new();
        cache.bucket("navigation").set("v1", b"tree");

        assert_eq!(cache.bucket("navigation").get("v1"), Some(b"tree".to_vec()));
    }

    #[test]
    fn test_buckets_are_isolated() {
        let cache = MemoryCache::new();
        cache.bucket("navigation").set("v1", b"tree");

        assert_eq!(cache.bucket("versions").get("v1"), None);
    }

    #[test]
    fn test_overwrite() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("versions");

        bucket.set("all", b"old");
        bucket.set("all", b"new");

        assert_eq!(bucket.get("all"), Some(b"new".to_vec()));
    }

    #[test]
    fn test_remove_only_drops_one_key() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("navigation");
        bucket.set("v1", b"a");
        bucket.set("v2", b"b");

        bucket.remove("v1");
        bucket.remove("missing");

        assert_eq!(bucket.get("v1"), None);
        assert_eq!(bucket.get("v2"), Some(b"b".to_vec()));
    }

    #[test]
    fn test_clear_affects_other_handles() {
        let cache = MemoryCache::new();
        let writer = cache.bucket("navigation");
        writer.set("v1", b"a");

        cache.bucket("navigation").clear();

        assert_eq!(writer.get("v1"), None);
    }
}
