//! Moka-backed LRU storage with per-entry TTL

use crate::types::{CacheEntry, CacheStats};
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use moka::Expiry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// TTLs beyond this are treated as "never expires"
const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Reads the TTL carried by each entry
struct PerEntryTtl;

impl<V> Expiry<String, CacheEntry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CacheEntry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        entry.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CacheEntry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        entry.ttl
    }
}

/// A bounded cache with least-recently-used eviction
pub struct BlobCache<V> {
    cache: Cache<String, CacheEntry<V>>,
    /// Maximum number of entries
    capacity: usize,
    /// Cache hit counter
    hits: AtomicU64,
    /// Cache miss counter
    misses: AtomicU64,
    /// Entries removed to make room
    evictions: Arc<AtomicU64>,
}

impl<V: Clone + Send + Sync + 'static> BlobCache<V> {
    /// Create a new cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let evictions = Arc::new(AtomicU64::new(0));

        let counter = evictions.clone();
        let cache = Cache::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .expire_after(PerEntryTtl)
            .eviction_listener(move |key, _value, cause| {
                if matches!(cause, RemovalCause::Size) {
                    counter.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, "Evicted least recently used entry");
                }
            })
            .build();

        Self {
            cache,
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions,
        }
    }

    /// Get a value, marking it as most recently used
    pub fn get(&self, key: &str) -> Option<V> {
        match self.cache.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Whether a live entry exists. Does not touch recency or counters.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Store a value. A `ttl_secs` of 0 keeps it until evicted or removed.
    pub fn put(&self, key: &str, value: V, ttl_secs: u64) {
        let ttl = match ttl_secs {
            0 => None,
            secs if secs > MAX_TTL_SECS => None,
            secs => Some(Duration::from_secs(secs)),
        };
        self.put_with_ttl(key, value, ttl);
    }

    /// Store a value with an exact TTL, `None` never expires
    pub fn put_with_ttl(&self, key: &str, value: V, ttl: Option<Duration>) {
        self.cache.insert(key.to_string(), CacheEntry { value, ttl });
        debug!(key = %key, ttl = ?ttl, "Cached value");
    }

    /// Remove an entry, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        self.cache.remove(key).is_some()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Apply buffered recency updates, expirations and evictions
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    pub fn len(&self) -> usize {
        self.cache.run_pending_tasks();
        self.cache.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get current cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
