//! Error types for liftlog core.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in liftlog store operations.
///
/// Unknown-id lookups are deliberately NOT errors: update and delete report
/// them through their return values (`Ok(None)` / `Ok(false)`) so callers can
/// treat them as soft no-ops.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend error. Fatal to the attempted operation; the
    /// in-memory state keeps serving the previous value.
    #[error("storage error: {0}")]
    Storage(#[from] liftlog_storage::StorageError),

    /// A record or input failed validation. Nothing was persisted or queued.
    #[error("validation failed: {message}")]
    Validation {
        /// What was rejected and why.
        message: String,
    },

    /// A backup file could not be interpreted.
    #[error("invalid backup file: {message}")]
    InvalidBackup {
        /// Why the file was rejected.
        message: String,
    },

    /// A schema migration could not be applied.
    #[error("migration failed: {message}")]
    MigrationFailed {
        /// Description of the failure.
        message: String,
    },

    /// Serialization failure while persisting a dataset.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error outside the storage backend (backup file handling).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an invalid backup error.
    pub fn invalid_backup(message: impl Into<String>) -> Self {
        Self::InvalidBackup {
            message: message.into(),
        }
    }

    /// Creates a migration failed error.
    pub fn migration_failed(message: impl Into<String>) -> Self {
        Self::MigrationFailed {
            message: message.into(),
        }
    }
}
