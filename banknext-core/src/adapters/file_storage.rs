//! File-backed session storage
//!
//! Keeps every session key in one JSON object (`session.json` in the data
//! directory). Writes take an exclusive lock on a sibling `.lock` file,
//! re-read the current contents, and replace the file atomically so that a
//! concurrent `bn` process never sees a half-written session.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::SessionStorage;

/// Default file name inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// Session storage persisted as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Storage at `<dir>/session.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Read the stored map. A missing file is an empty session; a corrupt
    /// one is treated the same way so a damaged file never locks the user
    /// out of logging in again.
    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::storage(format!("Failed to read {:?}: {}", self.path, e))),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "session file is corrupt, ignoring it");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.dir())
            .map_err(|e| Error::storage(format!("Failed to create temp file: {}", e)))?;
        let content = serde_json::to_string_pretty(entries)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::storage(format!("Failed to write {:?}: {}", self.path, e.error)))?;
        Ok(())
    }

    /// Run a read-modify-write cycle under the exclusive lock
    fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        std::fs::create_dir_all(self.dir())?;

        let lock_file: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| Error::storage(format!("Failed to open lock file: {}", e)))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock session file: {}", e)))?;

        let result = self.read_entries().and_then(|mut entries| {
            mutate(&mut entries);
            self.write_entries(&entries)
        });

        let _ = lock_file.unlock();
        result
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::in_dir(dir.path());
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::in_dir(dir.path());

        storage.set("token", "abc123").unwrap();
        storage.set("user", r#"{"firstName":"A"}"#).unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc123"));

        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
        assert!(storage.get("user").unwrap().is_some());
    }

    #[test]
    fn test_values_visible_to_a_fresh_instance() {
        let dir = TempDir::new().unwrap();
        FileSessionStorage::in_dir(dir.path()).set("token", "abc123").unwrap();

        let reopened = FileSessionStorage::in_dir(dir.path());
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_corrupt_file_is_ignored_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::in_dir(dir.path());
        std::fs::write(storage.path(), "{not json").unwrap();

        assert_eq!(storage.get("token").unwrap(), None);
        storage.set("token", "fresh").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_remove_without_file_does_not_create_one() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::in_dir(dir.path());
        storage.remove("token").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::in_dir(&dir.path().join("nested/banknext"));
        storage.set("token", "abc").unwrap();
        assert!(storage.path().exists());
    }
}
