//! Store configuration

use crate::store::DEFAULT_NAMESPACE_PREFIX;

const DEFAULT_LOCAL_CACHE_CAPACITY: usize = 1000;

/// Settings applied to a [`BlobStore`](crate::BlobStore) at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobStoreConfig {
    /// First segment of every key
    pub namespace_prefix: String,
    /// TTL given to containers produced by `read`, 0 = no expiry
    pub default_expiry_secs: u64,
    /// Entries kept by the local accelerator, 0 disables it
    pub local_cache_capacity: usize,
    /// Advisory usage flag, see `BlobStore::can_use`
    pub enabled: bool,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            default_expiry_secs: 0,
            local_cache_capacity: DEFAULT_LOCAL_CACHE_CAPACITY,
            enabled: true,
        }
    }
}

impl BlobStoreConfig {
    /// Load configuration from `BLOBSTORE_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let namespace_prefix = lookup("BLOBSTORE_PREFIX")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.namespace_prefix);

        let default_expiry_secs = lookup("BLOBSTORE_DEFAULT_EXPIRY_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.default_expiry_secs);

        let local_cache_capacity = lookup("BLOBSTORE_LOCAL_CACHE_CAPACITY")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.local_cache_capacity);

        let enabled = lookup("BLOBSTORE_ENABLED")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.enabled);

        Self {
            namespace_prefix,
            default_expiry_secs,
            local_cache_capacity,
            enabled,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
