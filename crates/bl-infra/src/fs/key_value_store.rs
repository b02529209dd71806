//! File-based key/value store
//!
//! Persists string values as a single JSON object in the application data
//! directory. Used for process-wide settings such as the device identifier.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use bl_core::errors::StorageError;
use bl_core::ports::KeyValueStorePort;
use tokio::sync::Mutex;
use tracing::debug;

use super::atomic::{read_optional, write_atomic};

pub const DEFAULT_KEY_VALUE_FILE: &str = "preferences.json";

pub struct FileKeyValueStore {
    file_path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_KEY_VALUE_FILE))
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match read_optional(&self.file_path).await? {
            Some(content) if !content.trim().is_empty() => Ok(serde_json::from_str(&content)?),
            _ => Ok(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_vec_pretty(&values)?;
        write_atomic(&self.file_path, &json, None).await?;
        debug!(key, path = %self.file_path.display(), "stored preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf());

        assert_eq!(store.get_string("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen_and_keep_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set_string("a", "1").await.unwrap();
        store.set_string("b", "2").await.unwrap();
        store.set_string("a", "3").await.unwrap();

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(reopened.get_string("a").await.unwrap().as_deref(), Some("3"));
        assert_eq!(reopened.get_string("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn empty_file_reads_as_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.json");
        tokio::fs::write(&path, "").await.unwrap();

        let store = FileKeyValueStore::new(path);

        assert_eq!(store.get_string("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_json_returns_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.json");
        tokio::fs::write(&path, "{invalid json").await.unwrap();

        let store = FileKeyValueStore::new(path);
        let result = store.get_string("a").await;

        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn with_defaults_uses_expected_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf());

        assert_eq!(
            store.file_path,
            temp_dir.path().join(DEFAULT_KEY_VALUE_FILE)
        );
    }
}
