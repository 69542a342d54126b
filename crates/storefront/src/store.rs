//! File-backed durable store.
//!
//! All entries live in a single JSON object on disk. The whole file is
//! rewritten on every change: the store holds three small entries, so there
//! is nothing to gain from anything finer grained.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use echoeats_core::storage::{KeyValueStore, StorageError};

/// File name of the store inside the data directory.
pub const STORE_FILE: &str = "echoeats.json";

/// Durable key-value store persisted as a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store in `dir`, creating the directory if needed.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be read, or its contents are not a JSON object of strings.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                    key: STORE_FILE.to_string(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened store");
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, replacing the file atomically.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string_pretty(entries).map_err(|source| StorageError::Malformed {
                key: STORE_FILE.to_string(),
                source,
            })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `change` to a copy of the entries and keep it only once it is
    /// on disk.
    fn commit(
        &mut self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        change(&mut next);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.commit(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use echoeats_core::storage::keys;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("nested")).unwrap();
        assert!(store.get(keys::USER).unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set(keys::PASSWORD, "hash".to_string()).unwrap();
            store.set(keys::USER, "{}".to_string()).unwrap();
            store.remove(keys::USER).unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get(keys::PASSWORD).unwrap().as_deref(), Some("hash"));
        assert!(store.get(keys::USER).unwrap().is_none());
        assert!(!dir.path().join("echoeats.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set(keys::PASSWORD, "old-hash".to_string()).unwrap();

        // A directory in the temp file's place makes every write fail.
        fs::create_dir(dir.path().join("echoeats.json.tmp")).unwrap();

        assert!(store.set(keys::PASSWORD, "new-hash".to_string()).is_err());
        assert_eq!(store.get(keys::PASSWORD).unwrap().as_deref(), Some("old-hash"));

        assert!(store.remove(keys::PASSWORD).is_err());
        assert_eq!(store.get(keys::PASSWORD).unwrap().as_deref(), Some("old-hash"));

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert!(on_disk.contains("old-hash"));
        assert!(!on_disk.contains("new-hash"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "not json").unwrap();

        let err = FileStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }
}
