//! Persistent key-value settings storage.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Settings key holding the API credential.
pub const API_KEY: &str = "openrouterApiKey";

/// Simple async key-value store for user settings.
///
/// Values are plain JSON; typed layouts are layered on top by callers.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
