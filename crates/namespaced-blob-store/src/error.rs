//! Error types for the namespaced blob store

use crate::backend::BackendError;
use std::fmt;

/// Errors raised by [`BlobStore`](crate::BlobStore) operations
#[derive(Debug)]
pub enum BlobStoreError {
    /// Namespace is empty or contains the `:` key separator
    InvalidNamespace(String),
    /// Identifier is empty
    InvalidIdentifier(String),
    /// Failure reported by the cache backend, passed through untouched
    Backend(BackendError),
    /// Payload could not be encoded or decoded
    Serialization(serde_json::Error),
}

impl fmt::Display for BlobStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNamespace(msg) => write!(f, "Invalid namespace: {}", msg),
            Self::InvalidIdentifier(msg) => write!(f, "Invalid identifier: {}", msg),
            Self::Backend(err) => write!(f, "Cache backend error: {}", err),
            Self::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for BlobStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err.as_ref()),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for BlobStoreError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

impl From<serde_json::Error> for BlobStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Result type for blob store operations
pub type Result<T> = std::result::Result<T, BlobStoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_namespace_display() {
        let err = BlobStoreError::InvalidNamespace("namespace must not be empty".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid namespace: namespace must not be empty"
        );
    }

    #[test]
    fn test_invalid_identifier_display() {
        let err = BlobStoreError::InvalidIdentifier("id must not be empty".to_string());
        assert_eq!(format!("{}", err), "Invalid identifier: id must not be empty");
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "redis down");
        let err = BlobStoreError::from(BackendError::from(io));

        assert!(format!("{}", err).contains("redis down"));
        let source = err.source().unwrap();
        assert!(source.is::<std::io::Error>());
    }

    #[test]
    fn test_serialization_error_from_json() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        let err: BlobStoreError = json_err.into();
        assert!(matches!(err, BlobStoreError::Serialization(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_is_debug() {
        let err = BlobStoreError::InvalidIdentifier("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidIdentifier"));
    }
}
