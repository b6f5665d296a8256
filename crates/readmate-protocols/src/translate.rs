//! Batch translation boundary between the session and the background service.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Translates one contiguous batch of paragraphs.
///
/// Implementations must preserve length and order: the returned vector has one
/// entry per input paragraph, in input order.
#[async_trait]
pub trait BlockTranslator: Send + Sync {
    async fn translate_block(
        &self,
        paragraphs: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;
}
