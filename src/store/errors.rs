//! # Store Errors
//!
//! Failures reported by a document store. None of these are retried by the
//! store layer; they travel up the pipeline unchanged.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// I/O failure while reading or writing collection data
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded as a document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document does not decode into its record type
    #[error("Corrupt document {key} in collection {collection}: {reason}")]
    Corrupt {
        collection: String,
        key: String,
        reason: String,
    },
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a corrupt document error
    pub fn corrupt(
        collection: impl Into<String>,
        key: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Corrupt {
            collection: collection.into(),
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure is a connectivity problem rather than bad data
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
