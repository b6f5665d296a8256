//! Translation session errors.

use thiserror::Error;

use super::ContentError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Content(#[from] ContentError),

    /// `start` is only valid when no session is active.
    #[error("A translation session is already active")]
    AlreadyActive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_passthrough() {
        let err = SessionError::from(ContentError::NoTranslatableText);
        assert_eq!(err.to_string(), "No translatable text found");
    }

    #[test]
    fn test_already_active_display() {
        assert!(SessionError::AlreadyActive.to_string().contains("already active"));
    }
}
