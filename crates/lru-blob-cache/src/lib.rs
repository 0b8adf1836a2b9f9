//! Bounded in-memory blob cache with TTL expiration and LRU eviction
//!
//! Keeps already-decoded values close to the caller so that repeated reads
//! skip the backing store and the decode step. Storage is a `moka` sync
//! cache with the LRU eviction policy and a TTL carried by each entry.
//! Capacity is counted in entries; once full, the least recently used entry
//! makes room.

mod cache;
mod types;

pub use cache::BlobCache;
pub use types::{CacheEntry, CacheStats};
