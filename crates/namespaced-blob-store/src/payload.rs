//! Payload encoding for blob records
//!
//! Records are stored as JSON objects. Whatever comes back from the backend
//! is normalized into a concrete [`BlobData`] map so a bare scalar never
//! reaches the caller.

use crate::error::Result;
use serde_json::{Map, Value};

/// Keyed, insertion-ordered record payload
pub type BlobData = Map<String, Value>;

/// Serialize a payload for the backend
pub fn encode(data: &BlobData) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(data)?)
}

/// Deserialize backend bytes into a normalized payload
pub fn decode(bytes: &[u8]) -> Result<BlobData> {
    if bytes.is_empty() {
        return Ok(BlobData::new());
    }
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(normalize(value))
}

/// Coerce any JSON value into a map.
///
/// Objects pass through, arrays are keyed by position, `null` and `false`
/// become empty, and any other scalar is wrapped under key `"0"`.
pub fn normalize(value: Value) -> BlobData {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        Value::Null | Value::Bool(false) => BlobData::new(),
        scalar => {
            let mut map = BlobData::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}
