//! In-memory backend that records the calls it receives

#![allow(dead_code)]

use namespaced_blob_store::{BackendError, BlobData, CacheBackend, CacheStats, LocalCache};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Contains(String),
    Fetch(String),
    Save(String, u64),
    Delete(String),
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, (Vec<u8>, u64)>>,
    calls: Mutex<Vec<Call>>,
    fail_with: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, bytes: &[u8]) -> Self {
        self.insert_raw(key, bytes);
        self
    }

    pub fn insert_raw(&self, key: &str, bytes: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes.to_vec(), 0));
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).map(|(b, _)| b.clone())
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    pub fn fail_all(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(std::io::Error::other(message.clone()).into()),
            None => Ok(()),
        }
    }
}

impl CacheBackend for MemoryBackend {
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        self.record(Call::Contains(key.to_string()))?;
        Ok(self.entries.lock().unwrap().contains_key(key))
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        self.record(Call::Fetch(key.to_string()))?;
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<(), BackendError> {
        self.record(Call::Save(key.to_string(), ttl_secs))?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), ttl_secs));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        self.record(Call::Delete(key.to_string()))?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn stats(&self) -> Map<String, Value> {
        let mut stats = Map::new();
        stats.insert("backend".to_string(), json!("memory"));
        stats.insert(
            "entries".to_string(),
            json!(self.entries.lock().unwrap().len()),
        );
        stats
    }
}

/// Local cache that remembers every save, sharing its log with the test
#[derive(Clone, Default)]
pub struct RecordingLocalCache {
    entries: Arc<Mutex<HashMap<String, BlobData>>>,
    saves: Arc<Mutex<Vec<(String, u64)>>>,
}

impl RecordingLocalCache {
    pub fn saves(&self) -> Vec<(String, u64)> {
        self.saves.lock().unwrap().clone()
    }
}

impl LocalCache for RecordingLocalCache {
    fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    fn fetch(&self, key: &str) -> Option<BlobData> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn save(&self, key: &str, data: BlobData, ttl_secs: u64) {
        self.saves.lock().unwrap().push((key.to_string(), ttl_secs));
        self.entries.lock().unwrap().insert(key.to_string(), data);
    }

    fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.lock().unwrap().len(),
            ..CacheStats::default()
        }
    }
}
