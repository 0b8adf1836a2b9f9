//! Local read-through accelerator
//!
//! Holds already-decoded payloads private to one store instance, so hot
//! records skip both the backend round-trip and the decode step.

use crate::payload::BlobData;
use lru_blob_cache::{BlobCache, CacheStats};

/// Bounded local cache of decoded payloads
pub trait LocalCache {
    fn contains(&self, key: &str) -> bool;

    fn fetch(&self, key: &str) -> Option<BlobData>;

    /// A `ttl_secs` of 0 keeps the entry until evicted
    fn save(&self, key: &str, data: BlobData, ttl_secs: u64);

    fn delete(&self, key: &str);

    fn stats(&self) -> CacheStats;
}

impl LocalCache for BlobCache<BlobData> {
    fn contains(&self, key: &str) -> bool {
        BlobCache::contains(self, key)
    }

    fn fetch(&self, key: &str) -> Option<BlobData> {
        self.get(key)
    }

    fn save(&self, key: &str, data: BlobData, ttl_secs: u64) {
        self.put(key, data, ttl_secs);
    }

    fn delete(&self, key: &str) {
        self.remove(key);
    }

    fn stats(&self) -> CacheStats {
        BlobCache::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blob_cache_as_local_cache() {
        let cache: Box<dyn LocalCache> = Box::new(BlobCache::<BlobData>::new(4));

        let mut data = BlobData::new();
        data.insert("k".to_string(), json!("v"));

        assert!(!cache.contains("blobstore:Foo:bar"));
        cache.save("blobstore:Foo:bar", data.clone(), 0);
        assert!(cache.contains("blobstore:Foo:bar"));
        assert_eq!(cache.fetch("blobstore:Foo:bar"), Some(data));

        cache.delete("blobstore:Foo:bar");
        assert!(cache.fetch("blobstore:Foo:bar").is_none());

        let stats = cache.stats();
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
