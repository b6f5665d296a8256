//! # readmate Style
//!
//! Visual presentation building blocks: built-in themes, color math, theme
//! and text-settings CSS generation, and markdown rendering for AI answers.
//! Everything here is pure string/value manipulation; applying the output to
//! a document is the caller's concern.

pub mod color;
pub mod css;
pub mod markdown;
pub mod theme;

pub use color::{adjust_brightness, format_hex, hsl_to_rgb, parse_hex};
pub use css::{text_settings_css, theme_css};
pub use theme::{builtin_theme, theme_names};
