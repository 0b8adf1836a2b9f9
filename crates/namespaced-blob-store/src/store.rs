//! Namespaced blob store
//!
//! Keys are built as `prefix:namespace:id`. Reads go through the local
//! accelerator first, then the backend. A read that misses both registers
//! the key in the namespace's tracking record, which is what
//! [`BlobStore::drop`] later walks to purge the namespace.

use crate::backend::CacheBackend;
use crate::config::BlobStoreConfig;
use crate::container::Container;
use crate::error::{BlobStoreError, Result};
use crate::local::LocalCache;
use crate::payload::{self, BlobData};
use crate::tracking::{tracking_key, TrackingRecord};
use lru_blob_cache::BlobCache;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub const DEFAULT_NAMESPACE_PREFIX: &str = "blobstore";

/// Key under which [`BlobStore::stats`] reports the local accelerator
pub const LOCAL_CACHE_STATS_KEY: &str = "local_cache";

const KEY_SEPARATOR: char = ':';

/// Namespaced façade over a [`CacheBackend`]
pub struct BlobStore<B> {
    namespace: String,
    backend: B,
    local: Option<Box<dyn LocalCache + Send + Sync>>,
    prefix: String,
    default_expiry: u64,
    usage_state: bool,
}

impl<B: CacheBackend> BlobStore<B> {
    /// Create a store with default settings and a local LRU accelerator
    pub fn new(namespace: impl Into<String>, backend: B) -> Result<Self> {
        Self::with_config(namespace, backend, &BlobStoreConfig::default())
    }

    /// Create a store from explicit configuration
    pub fn with_config(
        namespace: impl Into<String>,
        backend: B,
        config: &BlobStoreConfig,
    ) -> Result<Self> {
        let local: Option<Box<dyn LocalCache + Send + Sync>> =
            match config.local_cache_capacity {
                0 => None,
                capacity => Some(Box::new(BlobCache::<BlobData>::new(capacity))),
            };

        let mut store = Self::with_local_cache(namespace, backend, local)?;
        store.set_namespace_prefix(config.namespace_prefix.clone());
        store.set_expiry_in_seconds(config.default_expiry_secs);
        store.set_usage_state(config.enabled);
        Ok(store)
    }

    /// Create a store with a caller-supplied accelerator, or none at all
    pub fn with_local_cache(
        namespace: impl Into<String>,
        backend: B,
        local: Option<Box<dyn LocalCache + Send + Sync>>,
    ) -> Result<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;

        Ok(Self {
            namespace,
            backend,
            local,
            prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            default_expiry: 0,
            usage_state: true,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_prefix(&self) -> &str {
        &self.prefix
    }

    /// Change the first key segment. Affects keys computed from now on.
    pub fn set_namespace_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn default_expiry(&self) -> u64 {
        self.default_expiry
    }

    /// TTL given to containers produced by [`read`](Self::read)
    pub fn set_expiry_in_seconds(&mut self, seconds: u64) {
        self.default_expiry = seconds;
    }

    /// Advisory on/off switch. The store itself never consults it; callers
    /// are expected to check [`can_use`](Self::can_use) and skip the store.
    pub fn set_usage_state(&mut self, enabled: bool) {
        self.usage_state = enabled;
    }

    pub fn can_use(&self) -> bool {
        self.usage_state
    }

    /// Fully-qualified backend key for `id`
    pub fn key(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(BlobStoreError::InvalidIdentifier(
                "id must not be empty".to_string(),
            ));
        }
        Ok(format!(
            "{}{sep}{}{sep}{}",
            self.prefix,
            self.namespace,
            id,
            sep = KEY_SEPARATOR
        ))
    }

    /// Whether the backend holds a record for `id`
    pub fn exists(&self, id: &str) -> Result<bool> {
        let key = self.key(id)?;
        Ok(self.backend.contains(&key)?)
    }

    /// Read the record for `id`, creating an empty one on a miss.
    ///
    /// A miss registers the key in the tracking record straight away, even
    /// though nothing has been written yet, so a later [`drop`](Self::drop)
    /// covers it.
    pub fn read(&self, id: &str) -> Result<Container> {
        let key = self.key(id)?;

        let data = match self.local.as_ref().and_then(|local| local.fetch(&key)) {
            Some(data) => {
                debug!(key = %key, "Local cache hit");
                data
            }
            None if self.backend.contains(&key)? => {
                let data = match self.backend.fetch(&key)? {
                    Some(bytes) => payload::decode(&bytes)?,
                    None => BlobData::new(),
                };
                if let Some(local) = &self.local {
                    local.save(&key, data.clone(), self.default_expiry);
                }
                debug!(key = %key, "Backend hit");
                data
            }
            None => {
                self.add_to_internal_list(&key)?;
                debug!(key = %key, "Miss, registered new key");
                BlobData::new()
            }
        };

        Ok(Container::new(key, data).with_expiry(self.default_expiry))
    }

    /// Write a container under its own id, using its own expiry.
    ///
    /// The tracking record is not touched here.
    pub fn save(&self, container: &Container) -> Result<()> {
        let bytes = payload::encode(container.data())?;

        // Local copy only once the backend has accepted the write
        self.backend.save(container.id(), &bytes, container.expiry())?;
        if let Some(local) = &self.local {
            local.save(container.id(), container.data().clone(), container.expiry());
        }

        debug!(key = %container.id(), ttl_secs = container.expiry(), "Saved container");
        Ok(())
    }

    /// Untrack and delete the record for `id`.
    ///
    /// The tracking update and the physical delete are separate backend
    /// calls and are not atomic.
    pub fn delete(&self, id: &str) -> Result<()> {
        let key = self.key(id)?;

        self.remove_from_internal_list(&key)?;
        self.backend.delete(&key)?;
        if let Some(local) = &self.local {
            local.delete(&key);
        }

        debug!(key = %key, "Deleted container");
        Ok(())
    }

    /// Delete every key tracked under this namespace, returning how many.
    ///
    /// Dropped keys are also evicted from the local accelerator. The
    /// tracking record itself is left in place, so calling `drop` again
    /// re-issues deletes for keys that are already gone.
    pub fn drop(&self) -> Result<usize> {
        let record = TrackingRecord::load(&self.backend, &self.tracking_key())?;

        for id in record.ids() {
            self.backend.delete(id)?;
            if let Some(local) = &self.local {
                local.delete(id);
            }
        }

        info!(namespace = %self.namespace, keys = record.len(), "Dropped namespace");
        Ok(record.len())
    }

    /// Backend stats with the local accelerator's under [`LOCAL_CACHE_STATS_KEY`]
    pub fn stats(&self) -> Map<String, Value> {
        let mut stats = self.backend.stats();
        if let Some(local) = &self.local {
            match serde_json::to_value(local.stats()) {
                Ok(value) => {
                    stats.insert(LOCAL_CACHE_STATS_KEY.to_string(), value);
                }
                Err(e) => warn!(error = %e, "Failed to serialize local cache stats"),
            }
        }
        stats
    }

    /// Current tracking record for this namespace
    pub fn tracked(&self) -> Result<TrackingRecord> {
        TrackingRecord::load(&self.backend, &self.tracking_key())
    }

    fn tracking_key(&self) -> String {
        tracking_key(&self.prefix, &self.namespace)
    }

    fn add_to_internal_list(&self, key: &str) -> Result<()> {
        let tracking_key = self.tracking_key();
        let mut record = TrackingRecord::load(&self.backend, &tracking_key)?;
        record.insert(key);
        record.store(&self.backend, &tracking_key)
    }

    fn remove_from_internal_list(&self, key: &str) -> Result<()> {
        let tracking_key = self.tracking_key();
        let mut record = TrackingRecord::load(&self.backend, &tracking_key)?;
        record.remove(key);
        record.store(&self.backend, &tracking_key)
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Err(BlobStoreError::InvalidNamespace(
            "namespace must not be empty".to_string(),
        ));
    }
    if namespace.contains(KEY_SEPARATOR) {
        return Err(BlobStoreError::InvalidNamespace(format!(
            "namespace {:?} must not contain '{}'",
            namespace, KEY_SEPARATOR
        )));
    }
    Ok(())
}
