//! Shared data types for theming, text formatting and reading aids.

use serde::{Deserialize, Serialize};

/// A page color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: String,
    pub color: String,
    pub link_color: String,
}

impl Theme {
    pub fn new(
        background: impl Into<String>,
        color: impl Into<String>,
        link_color: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            color: color.into(),
            link_color: link_color.into(),
        }
    }
}

/// Text formatting settings applied to the main content container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    pub enabled: bool,
    pub font_size: u32,
    pub line_height: f32,
    pub paragraph_spacing: u32,
    pub font_family: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            font_size: 16,
            line_height: 1.6,
            paragraph_spacing: 12,
            font_family: "default".to_string(),
        }
    }
}

/// Context about the page a reading-aid request originates from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PageContext {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: None,
        }
    }
}

/// Fixed element identifiers for overlay UI inserted into the page.
///
/// Insertion under a fixed id removes any prior instance, so at most one of
/// each overlay exists at a time. Theme CSS must exclude these subtrees.
pub mod overlay {
    /// AI result / error popup container.
    pub const AI_POPUP: &str = "readmate-ai-popup";
    /// Loading indicator shown while an aid request is in flight.
    pub const AI_LOADER: &str = "readmate-ai-loader";
    /// Dimmed backdrop behind popups.
    pub const AI_OVERLAY: &str = "readmate-ai-overlay";
    /// Floating translation progress indicator.
    pub const PROGRESS: &str = "readmate-translation-progress";
    /// Transient translation-complete toast.
    pub const COMPLETE_TOAST: &str = "readmate-translation-complete";
    /// Injected theme stylesheet element.
    pub const THEME_STYLE: &str = "readmate-theme-style";
    /// Injected text-settings stylesheet element.
    pub const TEXT_STYLE: &str = "readmate-text-settings-style";
    /// Class marking the container text settings apply to.
    pub const ENHANCED_CLASS: &str = "readmate-text-enhanced";
}
