//! JSON-file backed settings store.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use readmate_protocols::{SettingsStore, StoreError};

/// Settings store persisting all entries as one JSON object on disk.
///
/// Every mutation rewrites the file; reads go to disk so external edits are
/// picked up. A mutex serializes writers within the process.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                let value: Value = serde_json::from_slice(&bytes)?;
                match value {
                    Value::Object(map) => Ok(map),
                    _ => Ok(Map::new()),
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&Value::Object(entries.clone()))?;
        fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::new(&path);
        store.set("openrouterApiKey", json!("sk-or-1")).await.unwrap();
        store.set("themes", json!({"example.com": "dark"})).await.unwrap();

        // A fresh instance reads what the first wrote.
        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("openrouterApiKey").await.unwrap(),
            Some(json!("sk-or-1"))
        );
        assert_eq!(
            reopened.get("themes").await.unwrap(),
            Some(json!({"example.com": "dark"}))
        );
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileStore::new(&path);
        store.set("k", json!(true)).await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/settings.json");
        let store = FileStore::new(&path);
        store.set("k", json!(1)).await.unwrap();
        assert!(path.exists());
    }
}
