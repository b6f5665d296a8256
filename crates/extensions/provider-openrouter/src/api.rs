//! OpenRouter API wire types.

use serde::{Deserialize, Serialize};

/// Chat-completion request body.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// API message format.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion response body.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    pub usage: Option<ApiUsage>,
}

/// Response choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

/// Response message.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Deserialize)]
pub struct ApiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_shape() {
        let request = ApiRequest {
            model: "deepseek/deepseek-chat-v3.1".to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            temperature: Some(0.3),
            max_tokens: Some(4000),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"deepseek/deepseek-chat-v3.1\""));
        assert!(json.contains("\"temperature\":0.3"));
        assert!(json.contains("\"max_tokens\":4000"));
    }

    #[test]
    fn test_response_parses_first_choice_content() {
        let json = r#"{
            "id": "gen-1",
            "model": "deepseek/deepseek-chat-v3.1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "[0] Hello"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("[0] Hello")
        );
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_error_body_parses_provider_message() {
        let json = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.error.unwrap().message.as_deref(),
            Some("Invalid API key")
        );
    }

    #[test]
    fn test_error_body_tolerates_unknown_shape() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
