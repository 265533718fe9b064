//! Local key-value configuration persisted to a single JSON file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Flat string-to-string store backed by one JSON file on disk.
///
/// Every mutation rewrites the whole file; the last successful write wins.
/// A single active process is assumed, so there is no cross-process locking.
pub struct ConfigStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Open a store at an explicit path, loading any existing entries.
    ///
    /// A missing file yields an empty store. A file that exists but does not
    /// parse is an error; the caller decides whether to start fresh.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Malformed config file: {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Open the store at the fixed per-application path under the platform
    /// user-data directory.
    pub fn in_user_data(file_name: &str) -> Result<Self> {
        let path = Self::user_data_path(file_name)
            .ok_or_else(|| anyhow::anyhow!("Could not determine user data directory"))?;
        Self::open(path)
    }

    /// Resolve a file name under the application's user-data directory.
    pub fn user_data_path(file_name: &str) -> Option<PathBuf> {
        ProjectDirs::from("com", "whiteboard", "Whiteboard")
            .map(|dirs| dirs.data_dir().join(file_name))
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or replace a value and rewrite the backing file.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    /// Remove a key and rewrite the backing file.
    ///
    /// Removing an absent key is a no-op that does not touch disk.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::open(dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark"));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_remove_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key"), None);
        // Removing again is fine
        store.remove("key").unwrap();
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = ConfigStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        store.set("b", "3").unwrap();

        let reopened = ConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get("a"), Some("2"));
        assert_eq!(reopened.get("b"), Some("3"));
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json {").unwrap();
        assert!(ConfigStore::open(&path).is_err());
    }

    #[test]
    fn test_creates_parent_directories_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let mut store = ConfigStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
