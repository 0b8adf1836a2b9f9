//! Per-namespace tracking record
//!
//! One record per (prefix, namespace) lists every fully-qualified key
//! registered under that namespace, so [`BlobStore::drop`](crate::BlobStore::drop)
//! can delete them in bulk. The record lives in the same backend as the
//! data and never expires.
//!
//! Updates are read-modify-write with no locking. Two writers racing on the
//! same namespace lose one update (last writer wins); the record is
//! bookkeeping for bulk deletes, not the source of truth for stored data.

use crate::backend::CacheBackend;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::warn;

const TRACKING_SUFFIX: &str = "internal-blobstore-id-list";

/// Backend key of the tracking record for `namespace`
pub fn tracking_key(prefix: &str, namespace: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(TRACKING_SUFFIX.as_bytes());
    format!("{}{}", prefix, hex::encode(hasher.finalize()))
}

/// Fully-qualified keys registered under one namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingRecord {
    entries: BTreeMap<String, bool>,
}

impl TrackingRecord {
    /// Load the record at `key`; absent or non-mapping payloads load empty.
    ///
    /// Entries whose marker is `false` or `null` are not members.
    pub fn load<B: CacheBackend + ?Sized>(backend: &B, key: &str) -> Result<Self> {
        let Some(bytes) = backend.fetch(key)? else {
            return Ok(Self::default());
        };
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(Self {
                entries: map
                    .into_iter()
                    .filter(|(_, marker)| !matches!(marker, Value::Null | Value::Bool(false)))
                    .map(|(id, _)| (id, true))
                    .collect(),
            }),
            Value::Null | Value::Bool(false) => Ok(Self::default()),
            other => {
                warn!(key = %key, payload = %other, "Tracking record is not a mapping, resetting");
                Ok(Self::default())
            }
        }
    }

    /// Persist the record at `key` with no expiry
    pub fn store<B: CacheBackend + ?Sized>(&self, backend: &B, key: &str) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        backend.save(key, &bytes, 0)?;
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.entries.insert(id.into(), true);
    }

    /// Returns whether the id was tracked
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
