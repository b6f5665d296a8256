use super::*;

#[test]
fn test_message_constructors() {
    assert_eq!(Message::system("s").role, MessageRole::System);
    assert_eq!(Message::user("u").role, MessageRole::User);
    assert_eq!(Message::assistant("a").role, MessageRole::Assistant);
    assert_eq!(Message::user("hello").content, "hello");
}

#[test]
fn test_role_serializes_lowercase() {
    let json = serde_json::to_string(&Message::system("x")).unwrap();
    assert!(json.contains("\"role\":\"system\""));
}

#[test]
fn test_request_builder() {
    let request = CompletionRequest::new("deepseek/deepseek-chat-v3.1", vec![Message::user("hi")])
        .with_temperature(0.3)
        .with_max_tokens(4000);
    assert_eq!(request.model, "deepseek/deepseek-chat-v3.1");
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(4000));
}

#[test]
fn test_request_omits_unset_sampling_fields() {
    let request = CompletionRequest::new("m", vec![]);
    let json = serde_json::to_string(&request).unwrap();
    assert!(!json.contains("temperature"));
    assert!(!json.contains("max_tokens"));
}

#[test]
fn test_response_round_trip() {
    let response = CompletionResponse {
        content: "translated".to_string(),
        model: Some("m".to_string()),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
    };
    let json = serde_json::to_string(&response).unwrap();
    let back: CompletionResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back.content, "translated");
    assert_eq!(back.usage.unwrap().total_tokens, 15);
}
