//! Background assistance service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use readmate_protocols::{
    BlockTranslator, CompletionRequest, LLMProvider, Message, PageContext, ProviderError, Request,
    Response, SettingsStore, StoreError,
};

use crate::cache::TranslationCache;
use crate::prompt;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub model: String,
    pub max_tokens: u32,
    pub translate_temperature: f32,
    pub aid_temperature: f32,
    pub summarize_temperature: f32,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            model: "deepseek/deepseek-chat-v3.1".to_string(),
            max_tokens: 4000,
            translate_temperature: 0.3,
            aid_temperature: 0.7,
            summarize_temperature: 0.5,
        }
    }
}

/// The background half of the engine: translation, reading aids, credential
/// management, and dispatch of background actions.
pub struct AssistService {
    provider: Arc<dyn LLMProvider>,
    store: Arc<dyn SettingsStore>,
    cache: TranslationCache,
    config: AssistConfig,
}

impl AssistService {
    pub fn new(provider: Arc<dyn LLMProvider>, store: Arc<dyn SettingsStore>) -> Self {
        Self::with_config(provider, store, AssistConfig::default(), TranslationCache::new())
    }

    pub fn with_config(
        provider: Arc<dyn LLMProvider>,
        store: Arc<dyn SettingsStore>,
        config: AssistConfig,
        cache: TranslationCache,
    ) -> Self {
        Self {
            provider,
            store,
            cache,
            config,
        }
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(&self.config.model, messages)
            .with_temperature(temperature)
            .with_max_tokens(self.config.max_tokens);
        Ok(self.provider.complete(request).await?.content)
    }

    /// Translate one free-text string, memoized by (text, language).
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        if let Some(hit) = self.cache.get(text, target_language) {
            debug!(target_language, "translation cache hit");
            return Ok(hit);
        }

        let language = prompt::language_display_name(target_language);
        let messages = vec![
            Message::system(prompt::translation_system_prompt(language)),
            Message::user(text),
        ];
        let translation = self
            .complete(messages, self.config.translate_temperature)
            .await?;

        self.cache.put(text, target_language, &translation);
        Ok(translation)
    }

    /// Translate a contiguous batch of paragraphs in one exchange.
    ///
    /// The batch itself is not cached, but it rides the single-text cache:
    /// re-requesting an identical batch reuses the stored exchange.
    pub async fn translate_paragraphs(
        &self,
        paragraphs: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let combined = prompt::build_numbered_prompt(paragraphs);
        debug!(
            paragraphs = paragraphs.len(),
            chars = combined.len(),
            "translating block"
        );
        let translation = self.translate_text(&combined, target_language).await?;
        Ok(prompt::parse_block_response(&translation, paragraphs))
    }

    pub async fn simplify(
        &self,
        text: &str,
        context: &PageContext,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            Message::system(prompt::simplify_system_prompt(text)),
            Message::user(prompt::aid_user_prompt(
                "Simplify the following text:",
                text,
                context.title.as_deref(),
            )),
        ];
        self.complete(messages, self.config.aid_temperature).await
    }

    pub async fn explain(
        &self,
        text: &str,
        context: &PageContext,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            Message::system(prompt::explain_system_prompt(text)),
            Message::user(prompt::aid_user_prompt(
                "Explain the following text:",
                text,
                context.title.as_deref(),
            )),
        ];
        self.complete(messages, self.config.aid_temperature).await
    }

    pub async fn summarize(
        &self,
        text: &str,
        context: &PageContext,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            Message::system(prompt::summarize_system_prompt(text)),
            Message::user(prompt::aid_user_prompt(
                "Summarize the following text:",
                text,
                context.title.as_deref(),
            )),
        ];
        self.complete(messages, self.config.summarize_temperature)
            .await
    }

    pub async fn has_api_key(&self) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get(readmate_protocols::store::API_KEY)
            .await?
            .and_then(|value| value.as_str().map(str::to_string))
            .is_some_and(|key| !key.is_empty()))
    }

    pub async fn save_api_key(&self, api_key: &str) -> Result<(), StoreError> {
        info!("saving API key");
        self.store
            .set(readmate_protocols::store::API_KEY, json!(api_key))
            .await
    }

    /// Dispatch one background action. Failures are isolated to the
    /// exchange: every error becomes a `{success: false}` response.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::CheckApiKey => match self.has_api_key().await {
                Ok(has_key) => Response::key_status(has_key),
                Err(err) => Response::failure(err.to_string()),
            },
            Request::SaveApiKey { api_key } => match self.save_api_key(&api_key).await {
                Ok(()) => Response::ok(),
                Err(err) => Response::failure(err.to_string()),
            },
            Request::TranslateBlock {
                paragraphs,
                target_language,
            } => {
                debug!(paragraphs = paragraphs.len(), "translateBlock");
                match self
                    .translate_paragraphs(&paragraphs, &target_language)
                    .await
                {
                    Ok(translations) => Response::translations(translations),
                    Err(err) => {
                        warn!(error = %err, "block translation failed");
                        Response::failure(err.to_string())
                    }
                }
            }
            Request::SimplifyText { text, page_context } => {
                match self.simplify(&text, &page_context).await {
                    Ok(result) => Response::result(result),
                    Err(err) => Response::failure(err.to_string()),
                }
            }
            Request::ExplainText { text, page_context } => {
                match self.explain(&text, &page_context).await {
                    Ok(result) => Response::result(result),
                    Err(err) => Response::failure(err.to_string()),
                }
            }
            Request::SummarizeText { text, page_context } => {
                match self.summarize(&text, &page_context).await {
                    Ok(result) => Response::result(result),
                    Err(err) => Response::failure(err.to_string()),
                }
            }
            other => {
                warn!(action = ?other, "unknown background action");
                Response::failure("Unknown action")
            }
        }
    }
}

#[async_trait]
impl BlockTranslator for AssistService {
    async fn translate_block(
        &self,
        paragraphs: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.translate_paragraphs(paragraphs, target_language).await
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
