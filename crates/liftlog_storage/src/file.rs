//! File-based storage backend for persistent storage.

use crate::backend::{validate_key, StorageBackend};
use crate::error::StorageResult;
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// Each key is stored as `<key>.json` inside a data directory, so a store's
/// datasets stay individually inspectable and a write only rewrites the
/// dataset it touched. Data survives process restarts.
///
/// # Durability
///
/// Writes go to a temporary file in the same directory and are renamed over
/// the target, so readers observe either the old value or the new one. A
/// failed write never clobbers the previous value.
///
/// # Thread Safety
///
/// This backend is thread-safe. Internal locking serializes writes.
///
/// # Example
///
/// ```no_run
/// use liftlog_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("liftlog_data")).unwrap();
/// backend.put("active_day", b"2").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Opens a file backend rooted at `dir`, creating the directory
    /// (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the data directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        match fs::read(self.key_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        let _guard = self.write_lock.lock();

        let target = self.key_path(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let _guard = self.write_lock.lock();

        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(key) = name.strip_suffix(".json") {
                if validate_key(key).is_ok() {
                    keys.push(key.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn clear(&self) -> StorageResult<()> {
        for key in self.keys()? {
            self.delete(&key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_open_creates_directory() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("liftlog_data");

        let backend = FileBackend::open(&data_dir).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(backend.dir(), data_dir);
    }

    #[test]
    fn file_put_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("exercises", br#"[{"id":"abc"}]"#).unwrap();
        assert_eq!(
            backend.get("exercises").unwrap(),
            Some(br#"[{"id":"abc"}]"#.to_vec())
        );
    }

    #[test]
    fn file_get_unset_key_is_none() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("workout_log").unwrap(), None);
    }

    #[test]
    fn file_put_replaces_atomically() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("locations", b"[\"a\"]").unwrap();
        backend.put("locations", b"[\"a\",\"b\"]").unwrap();

        assert_eq!(
            backend.get("locations").unwrap(),
            Some(b"[\"a\",\"b\"]".to_vec())
        );
        // No stray temp file left behind.
        assert!(!dir.path().join("locations.json.tmp").exists());
    }

    #[test]
    fn file_persists_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.put("active_day", b"4").unwrap();
        }

        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("active_day").unwrap(), Some(b"4".to_vec()));
    }

    #[test]
    fn file_delete_removes_file() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("sync_queue", b"[]").unwrap();
        backend.delete("sync_queue").unwrap();

        assert_eq!(backend.get("sync_queue").unwrap(), None);
        assert!(!dir.path().join("sync_queue.json").exists());
    }

    #[test]
    fn file_delete_unset_key_is_noop() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(backend.delete("sync_queue").is_ok());
    }

    #[test]
    fn file_keys_lists_stored_datasets() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("exercises", b"[]").unwrap();
        backend.put("workout_log", b"[]").unwrap();

        let mut keys = backend.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["exercises", "workout_log"]);
    }

    #[test]
    fn file_keys_ignores_foreign_files() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("exercises", b"[]").unwrap();
        std::fs::write(dir.path().join("README.txt"), b"notes").unwrap();

        assert_eq!(backend.keys().unwrap(), vec!["exercises"]);
    }

    #[test]
    fn file_clear_removes_all_keys() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.put("exercises", b"[]").unwrap();
        backend.put("settings", b"{}").unwrap();
        backend.clear().unwrap();

        assert!(backend.keys().unwrap().is_empty());
    }
}
