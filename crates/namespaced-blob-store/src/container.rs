//! Blob record value object

use crate::payload::BlobData;
use serde::{Deserialize, Serialize};

/// A blob record: fully-qualified id, payload and time-to-live
///
/// The id and payload are fixed at construction. To change a record, build
/// a new container with the same id and save it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    id: String,
    data: BlobData,
    /// Seconds to live, 0 = no expiry
    expiry: u64,
}

impl Container {
    pub fn new(id: impl Into<String>, data: BlobData) -> Self {
        Self {
            id: id.into(),
            data,
            expiry: 0,
        }
    }

    /// Fully-qualified cache key
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &BlobData {
        &self.data
    }

    pub fn into_data(self) -> BlobData {
        self.data
    }

    pub fn expiry(&self) -> u64 {
        self.expiry
    }

    pub fn set_expiry_in_seconds(&mut self, seconds: u64) {
        self.expiry = seconds;
    }

    pub fn with_expiry(mut self, seconds: u64) -> Self {
        self.expiry = seconds;
        self
    }
}
