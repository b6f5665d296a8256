//! Typed settings layout over the raw key-value store.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use readmate_protocols::{SettingsStore, StoreError, TextSettings, Theme};

/// Storage keys. Names match the original extension layout so existing
/// settings files stay readable.
pub mod keys {
    /// Per-domain map of chosen theme names.
    pub const THEMES: &str = "themes";
    /// Per-domain map of text formatting settings.
    pub const TEXT_SETTINGS: &str = "textSettings";
    /// The single user-defined custom theme.
    pub const CUSTOM_THEME: &str = "customTheme";
    /// OpenRouter API credential.
    pub use readmate_protocols::store::API_KEY;
}

/// Typed access to user settings.
#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn SettingsStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn SettingsStore> {
        self.store.clone()
    }

    async fn domain_map(&self, key: &str) -> Result<Map<String, Value>, StoreError> {
        Ok(match self.store.get(key).await? {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        })
    }

    /// Chosen theme name for a domain, if any.
    pub async fn theme_for_domain(&self, domain: &str) -> Result<Option<String>, StoreError> {
        let map = self.domain_map(keys::THEMES).await?;
        Ok(map.get(domain).and_then(|v| v.as_str()).map(str::to_string))
    }

    pub async fn set_theme_for_domain(&self, domain: &str, name: &str) -> Result<(), StoreError> {
        let mut map = self.domain_map(keys::THEMES).await?;
        map.insert(domain.to_string(), json!(name));
        self.store.set(keys::THEMES, Value::Object(map)).await
    }

    pub async fn text_settings_for_domain(
        &self,
        domain: &str,
    ) -> Result<Option<TextSettings>, StoreError> {
        let map = self.domain_map(keys::TEXT_SETTINGS).await?;
        Ok(map
            .get(domain)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok()))
    }

    pub async fn set_text_settings_for_domain(
        &self,
        domain: &str,
        settings: &TextSettings,
    ) -> Result<(), StoreError> {
        let mut map = self.domain_map(keys::TEXT_SETTINGS).await?;
        map.insert(domain.to_string(), serde_json::to_value(settings)?);
        self.store.set(keys::TEXT_SETTINGS, Value::Object(map)).await
    }

    pub async fn custom_theme(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self
            .store
            .get(keys::CUSTOM_THEME)
            .await?
            .and_then(|v| serde_json::from_value(v).ok()))
    }

    pub async fn set_custom_theme(&self, theme: &Theme) -> Result<(), StoreError> {
        self.store
            .set(keys::CUSTOM_THEME, serde_json::to_value(theme)?)
            .await
    }

    /// The stored API credential. Empty strings count as absent.
    pub async fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(keys::API_KEY)
            .await?
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|key| !key.is_empty()))
    }

    pub async fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        self.store.set(keys::API_KEY, json!(key)).await
    }

    pub async fn has_api_key(&self) -> Result<bool, StoreError> {
        Ok(self.api_key().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn settings() -> Settings {
        Settings::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_theme_per_domain_isolated() {
        let settings = settings();
        settings.set_theme_for_domain("a.example", "dark").await.unwrap();
        settings.set_theme_for_domain("b.example", "sepia").await.unwrap();

        assert_eq!(
            settings.theme_for_domain("a.example").await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(
            settings.theme_for_domain("b.example").await.unwrap().as_deref(),
            Some("sepia")
        );
        assert!(settings.theme_for_domain("c.example").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_text_settings_round_trip() {
        let settings = settings();
        let configured = TextSettings {
            enabled: true,
            font_size: 20,
            line_height: 1.8,
            paragraph_spacing: 16,
            font_family: "Georgia, serif".to_string(),
        };
        settings
            .set_text_settings_for_domain("a.example", &configured)
            .await
            .unwrap();
        let loaded = settings
            .text_settings_for_domain("a.example")
            .await
            .unwrap()
            .expect("settings stored");
        assert_eq!(loaded, configured);
    }

    #[tokio::test]
    async fn test_custom_theme_round_trip() {
        let settings = settings();
        assert!(settings.custom_theme().await.unwrap().is_none());
        let theme = Theme::new("#101010", "#f0f0f0", "#3399ff");
        settings.set_custom_theme(&theme).await.unwrap();
        assert_eq!(settings.custom_theme().await.unwrap(), Some(theme));
    }

    #[tokio::test]
    async fn test_empty_api_key_counts_as_absent() {
        let settings = settings();
        assert!(!settings.has_api_key().await.unwrap());
        settings.set_api_key("").await.unwrap();
        assert!(!settings.has_api_key().await.unwrap());
        settings.set_api_key("sk-or-1").await.unwrap();
        assert!(settings.has_api_key().await.unwrap());
        assert_eq!(settings.api_key().await.unwrap().as_deref(), Some("sk-or-1"));
    }
}
