//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The key is not a valid storage key.
    #[error("invalid storage key {key:?}: keys must be non-empty lowercase [a-z0-9_]")]
    InvalidKey {
        /// The offending key.
        key: String,
    },

    /// A write was rejected by the backend (out of space or injected failure).
    #[error("write failed for key {key:?}")]
    WriteFailed {
        /// The key whose write failed.
        key: String,
    },

    /// The value stored under a key could not be interpreted.
    #[error("storage corrupted at key {key:?}: {reason}")]
    Corrupted {
        /// The key holding the corrupt value.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl StorageError {
    /// Creates a [`StorageError::Corrupted`] for `key`.
    pub fn corrupted(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
