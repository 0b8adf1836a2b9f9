//! Cache backend capability
//!
//! The physical storage engine (Redis, memcached, an in-process map, ...)
//! lives behind [`CacheBackend`]. The store only ever talks to it through
//! these five calls and treats each of them as blocking and atomic.

use serde_json::{Map, Value};
use std::sync::Arc;

/// Opaque failure from a backend, surfaced to callers unchanged
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Minimal key-value capability the blob store delegates to
pub trait CacheBackend {
    /// Whether `key` is present
    fn contains(&self, key: &str) -> Result<bool, BackendError>;

    /// Raw bytes stored at `key`, `None` when absent
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Store `value` at `key`; a `ttl_secs` of 0 never expires
    fn save(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<(), BackendError>;

    fn delete(&self, key: &str) -> Result<(), BackendError>;

    /// Backend-specific diagnostics
    fn stats(&self) -> Map<String, Value>;
}

impl<T: CacheBackend + ?Sized> CacheBackend for &T {
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        (**self).contains(key)
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).fetch(key)
    }

    fn save(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<(), BackendError> {
        (**self).save(key, value, ttl_secs)
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        (**self).delete(key)
    }

    fn stats(&self) -> Map<String, Value> {
        (**self).stats()
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Box<T> {
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        (**self).contains(key)
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).fetch(key)
    }

    fn save(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<(), BackendError> {
        (**self).save(key, value, ttl_secs)
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        (**self).delete(key)
    }

    fn stats(&self) -> Map<String, Value> {
        (**self).stats()
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Arc<T> {
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        (**self).contains(key)
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).fetch(key)
    }

    fn save(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<(), BackendError> {
        (**self).save(key, value, ttl_secs)
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        (**self).delete(key)
    }

    fn stats(&self) -> Map<String, Value> {
        (**self).stats()
    }
}
