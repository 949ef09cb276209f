//! In-memory storage backend for testing.

use crate::backend::{validate_key, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// An in-memory storage backend.
///
/// This backend keeps all values in a map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use liftlog_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.put("exercises", b"[]").unwrap();
/// assert_eq!(backend.get("exercises").unwrap(), Some(b"[]".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with the given entries.
    ///
    /// Useful for testing load and migration scenarios.
    #[must_use]
    pub fn with_entries(entries: HashMap<String, Vec<u8>>) -> Self {
        Self {
            entries: RwLock::new(entries),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail with [`StorageError::WriteFailed`].
    ///
    /// Models a full quota so callers can test their failure paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check_writable(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn clear(&self) -> StorageResult<()> {
        self.check_writable("")?;
        self.entries.write().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.is_empty());
        assert!(backend.keys().unwrap().is_empty());
    }

    #[test]
    fn memory_get_unset_key_is_none() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.get("exercises").unwrap(), None);
    }

    #[test]
    fn memory_put_then_get_round_trips() {
        let backend = InMemoryBackend::new();
        backend.put("exercises", b"[1,2]").unwrap();
        assert_eq!(backend.get("exercises").unwrap(), Some(b"[1,2]".to_vec()));
    }

    #[test]
    fn memory_put_replaces_previous_value() {
        let backend = InMemoryBackend::new();
        backend.put("active_day", b"1").unwrap();
        backend.put("active_day", b"3").unwrap();
        assert_eq!(backend.get("active_day").unwrap(), Some(b"3".to_vec()));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn memory_delete_removes_key() {
        let backend = InMemoryBackend::new();
        backend.put("locations", b"[]").unwrap();
        backend.delete("locations").unwrap();
        assert_eq!(backend.get("locations").unwrap(), None);
    }

    #[test]
    fn memory_delete_unset_key_is_noop() {
        let backend = InMemoryBackend::new();
        assert!(backend.delete("locations").is_ok());
    }

    #[test]
    fn memory_invalid_key_rejected() {
        let backend = InMemoryBackend::new();
        let result = backend.put("Bad Key", b"x");
        assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
    }

    #[test]
    fn memory_failed_write_preserves_previous_value() {
        let backend = InMemoryBackend::new();
        backend.put("exercises", b"old").unwrap();

        backend.fail_writes(true);
        let result = backend.put("exercises", b"new");
        assert!(matches!(result, Err(StorageError::WriteFailed { .. })));
        assert_eq!(backend.get("exercises").unwrap(), Some(b"old".to_vec()));

        backend.fail_writes(false);
        backend.put("exercises", b"new").unwrap();
        assert_eq!(backend.get("exercises").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn memory_clear_removes_everything() {
        let backend = InMemoryBackend::new();
        backend.put("exercises", b"[]").unwrap();
        backend.put("workout_log", b"[]").unwrap();
        backend.clear().unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn memory_with_entries_preloads() {
        let mut entries = HashMap::new();
        entries.insert("last_sync".to_string(), b"null".to_vec());
        let backend = InMemoryBackend::with_entries(entries);
        assert_eq!(backend.get("last_sync").unwrap(), Some(b"null".to_vec()));
    }

    proptest! {
        #[test]
        fn memory_round_trips_arbitrary_values(
            key in "[a-z][a-z0-9_]{0,15}",
            value in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let backend = InMemoryBackend::new();
            backend.put(&key, &value).unwrap();
            prop_assert_eq!(backend.get(&key).unwrap(), Some(value));
        }
    }
}
