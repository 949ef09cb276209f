//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};

/// A low-level storage backend for liftlog.
///
/// Storage backends are **flat key/value stores**. Each dataset (exercises,
/// workout log, settings, ...) lives under one string key and is read and
/// replaced as a whole. Backends do not interpret the stored bytes - the
/// store layer owns all serialization.
///
/// # Invariants
///
/// - `get` returns exactly the bytes most recently `put` under that key
/// - A failed `put` leaves the previous value of the key readable
/// - Backends must be `Send + Sync` for shared access
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing and ephemeral data
/// - [`super::FileBackend`] - One JSON file per key in a data directory
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The replacement is atomic: readers observe either the old value
    /// or the new one, never a partial write.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails. On
    /// failure the previous value remains readable.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Removes `key` and its value. Removing an unset key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Returns all keys that currently hold a value, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the key listing cannot be read.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Removes every key and value.
    ///
    /// # Errors
    ///
    /// Returns an error if any removal fails.
    fn clear(&self) -> StorageResult<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}

/// Validates a storage key: non-empty, lowercase alphanumeric or underscore.
///
/// Keys double as file names in the file backend, so the charset is kept
/// deliberately narrow.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys_pass() {
        for key in ["exercises", "workout_log", "schema_version", "k2"] {
            assert!(validate_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn invalid_keys_fail() {
        for key in ["", "Exercises", "workout log", "a/b", "a.json", "naïve"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey { .. })),
                "{key:?} should be invalid"
            );
        }
    }
}
