//! OpenRouter provider implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use readmate_protocols::{
    CompletionRequest, CompletionResponse, LLMProvider, MessageRole, ProviderError, SettingsStore,
    Usage,
};

use crate::api::{ApiErrorBody, ApiMessage, ApiRequest, ApiResponse};

const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Chat-completions endpoint (override for OpenAI-compatible APIs).
    pub base_url: String,
    /// Sent as `HTTP-Referer`, identifying the calling application.
    pub referer: String,
    /// Sent as `X-Title`.
    pub title: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            referer: "https://github.com/readmate/readmate".to_string(),
            title: "readmate".to_string(),
        }
    }
}

/// OpenRouter chat-completion provider.
///
/// The API credential lives in the settings store and is looked up per call,
/// so a key saved mid-session takes effect on the next request.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    store: Arc<dyn SettingsStore>,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_config(store, OpenRouterConfig::default())
    }

    pub fn with_config(store: Arc<dyn SettingsStore>, config: OpenRouterConfig) -> Self {
        Self {
            config,
            store,
            client: reqwest::Client::new(),
        }
    }

    async fn api_key(&self) -> Result<String, ProviderError> {
        let key = self
            .store
            .get(readmate_protocols::store::API_KEY)
            .await?
            .and_then(|value| value.as_str().map(str::to_string))
            .filter(|key| !key.is_empty());
        key.ok_or(ProviderError::MissingApiKey)
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|message| ApiMessage {
                    role: match message.role {
                        MessageRole::System => "system",
                        MessageRole::User => "user",
                        MessageRole::Assistant => "assistant",
                    }
                    .to_string(),
                    content: message.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenRouterProvider {
    fn id(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let api_key = self.api_key().await?;
        let api_request = self.build_request(&request);

        debug!(model = %api_request.model, messages = api_request.messages.len(), "completion request");

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| {
                    if text.trim().is_empty() {
                        format!("HTTP {}", status.as_u16())
                    } else {
                        text.trim().to_string()
                    }
                });
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no choices".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: api_response.model,
            usage: api_response.usage.map(|usage| Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
