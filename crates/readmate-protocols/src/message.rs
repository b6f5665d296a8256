//! Action-tagged request/response contract between the engine surfaces.
//!
//! Wire names match the original extension protocol so recorded traffic and
//! settings remain readable.

use serde::{Deserialize, Serialize};

use crate::types::{PageContext, TextSettings, Theme};

/// A request routed between surfaces, tagged by action name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Begin a translation session over the current page.
    #[serde(rename_all = "camelCase")]
    StartPageTranslation { target_language: String },

    /// Disable the active session, keeping already-translated text.
    StopTranslation,

    /// Restore every unit's original text and tear the session down.
    RestoreOriginal,

    /// Translate one contiguous batch of paragraphs.
    #[serde(rename_all = "camelCase")]
    TranslateBlock {
        paragraphs: Vec<String>,
        target_language: String,
    },

    CheckApiKey,

    #[serde(rename_all = "camelCase")]
    SaveApiKey { api_key: String },

    #[serde(rename_all = "camelCase")]
    SimplifyText {
        text: String,
        #[serde(default)]
        page_context: PageContext,
    },

    #[serde(rename_all = "camelCase")]
    ExplainText {
        text: String,
        #[serde(default)]
        page_context: PageContext,
    },

    #[serde(rename_all = "camelCase")]
    SummarizeText {
        text: String,
        #[serde(default)]
        page_context: PageContext,
    },

    #[serde(rename_all = "camelCase")]
    ApplyTheme { theme: Theme, theme_name: String },

    ApplyTextSettings { settings: TextSettings },
}

/// Response to a [`Request`]. Fields beyond `success` are populated per action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Total unit count, returned by `startPageTranslation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    /// Units translated so far, returned by `startPageTranslation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<usize>,

    /// Per-paragraph translations, returned by `translateBlock`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_key: Option<bool>,

    /// Reading-aid result text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Response {
    /// Plain success acknowledgement.
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// Failed exchange with a user-facing message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn start_report(total: usize, translated: usize) -> Self {
        Self {
            success: true,
            total: Some(total),
            translated: Some(translated),
            ..Default::default()
        }
    }

    pub fn translations(translations: Vec<String>) -> Self {
        Self {
            success: true,
            translations: Some(translations),
            ..Default::default()
        }
    }

    pub fn key_status(has_key: bool) -> Self {
        Self {
            success: true,
            has_key: Some(has_key),
            ..Default::default()
        }
    }

    pub fn result(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
