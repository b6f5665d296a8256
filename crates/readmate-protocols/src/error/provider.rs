//! Remote completion provider errors.

use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No credential configured. Raised before any request is built.
    #[error("API key is not configured")]
    MissingApiKey,

    /// Non-success response from the remote service.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential lookup failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ProviderError {
    /// Whether the error was raised before any remote call was attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ProviderError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        let err = ProviderError::MissingApiKey;
        assert!(err.to_string().contains("not configured"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_api_error_display() {
        let err = ProviderError::Api {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Rate limit exceeded"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_network_error_display() {
        let err = ProviderError::Network("connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
    }

    #[test]
    fn test_invalid_response_display() {
        let err = ProviderError::InvalidResponse("missing choices".to_string());
        assert!(err.to_string().contains("Invalid response"));
    }
}
