//! Optional TOML configuration for the CLI.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Application configuration, merged over built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderSection,
    pub translate: TranslateSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// Chat-completions endpoint override.
    pub base_url: Option<String>,
    /// Model identifier override.
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TranslateSection {
    pub batch_size: Option<usize>,
}

impl AppConfig {
    /// Load from an explicit path, or `readmate.toml` in the working
    /// directory when present. Unreadable config degrades to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let candidate = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Path::new("readmate.toml");
                if !default.exists() {
                    return Self::default();
                }
                default.to_path_buf()
            }
        };

        match std::fs::read_to_string(&candidate) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %candidate.display(), error = %err, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %candidate.display(), error = %err, "unreadable config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.provider.model.is_none());
        assert!(config.translate.batch_size.is_none());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [provider]
            model = "deepseek/deepseek-chat-v3.1"

            [translate]
            batch_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(
            config.provider.model.as_deref(),
            Some("deepseek/deepseek-chat-v3.1")
        );
        assert_eq!(config.translate.batch_size, Some(10));
        assert!(config.provider.base_url.is_none());
    }
}
