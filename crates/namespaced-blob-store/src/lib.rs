//! Namespaced blob store
//!
//! Stores structured blob records under a logical namespace on top of any
//! key-value cache backend, with optional expiry. Every key created under a
//! namespace is recorded in a per-namespace tracking record so the whole
//! namespace can be purged with a single [`BlobStore::drop`].
//!
//! # Example
//!
//! ```no_run
//! use namespaced_blob_store::{BlobStore, CacheBackend, Container};
//!
//! # fn example<B: CacheBackend>(backend: B) -> namespaced_blob_store::Result<()> {
//! let store = BlobStore::new("sessions", backend)?;
//!
//! let container = store.read("user-42")?;
//! assert_eq!(container.id(), "blobstore:sessions:user-42");
//!
//! let mut data = container.data().clone();
//! data.insert("theme".to_string(), "dark".into());
//! store.save(&Container::new(container.id(), data).with_expiry(3600))?;
//!
//! // Purge every key ever read under "sessions"
//! store.drop()?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod config;
mod container;
mod error;
mod local;
mod payload;
mod store;
mod tracking;

pub use backend::{BackendError, CacheBackend};
pub use config::BlobStoreConfig;
pub use container::Container;
pub use error::{BlobStoreError, Result};
pub use local::LocalCache;
pub use lru_blob_cache::CacheStats;
pub use payload::{decode, encode, normalize, BlobData};
pub use store::{BlobStore, DEFAULT_NAMESPACE_PREFIX, LOCAL_CACHE_STATS_KEY};
pub use tracking::{tracking_key, TrackingRecord};
