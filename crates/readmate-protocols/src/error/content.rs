//! Content discovery errors.

use thiserror::Error;

/// Raised by content location and extraction, before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("No readable content container found")]
    NoContainer,

    #[error("No translatable text found")]
    NoTranslatableText,
}
