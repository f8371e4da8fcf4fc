//! Data model unit tests

use chat_gateway::models::chat::*;
use chat_gateway::models::openai::*;
use serde_json::json;

#[test]
fn test_chat_request_optional_fields() {
    let request: ChatRequest = serde_json::from_str(r#"{"message":"Hello"}"#).unwrap();
    assert_eq!(request, ChatRequest::new("Hello"));

    let request: ChatRequest = serde_json::from_str(r#"{"message":"Hello","model":"openai/gpt-4o"}"#).unwrap();
    assert_eq!(request, ChatRequest::new("Hello").with_model("openai/gpt-4o"));

    let request: ChatRequest = serde_json::from_str(r#"{"model":null}"#).unwrap();
    assert_eq!(request.message_text(), None);
    assert_eq!(request.model, None);
}

#[test]
fn test_chat_request_ignores_unknown_fields() {
    let request: ChatRequest =
        serde_json::from_str(r#"{"message":"Hello","conversationId":"abc","stream":true}"#).unwrap();
    assert_eq!(request.message_text(), Some("Hello"));
}

#[test]
fn test_chat_response_wire_shape() {
    let response = ChatResponse {
        model: "openai/gpt-3.5-turbo".to_string(),
        response: "hi".to_string(),
        tokens_used: 5,
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "model": "openai/gpt-3.5-turbo", "response": "hi", "tokensUsed": 5 })
    );
}

#[test]
fn test_error_body_wire_shape() {
    let body = ErrorBody { error: "Message is required".to_string() };
    assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "error": "Message is required" }));
}

#[test]
fn test_upstream_request_wire_shape() {
    let request = OpenAIRequest {
        model: "openai/gpt-3.5-turbo".to_string(),
        messages: vec![OpenAIMessage::user("Hello")],
        max_tokens: Some(150),
        temperature: Some(0.7),
    };

    // Parse the wire text so the f32 temperature is read back as written
    let wire: serde_json::Value = serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
    assert_eq!(
        wire,
        json!({
            "model": "openai/gpt-3.5-turbo",
            "messages": [{ "role": "user", "content": "Hello" }],
            "max_tokens": 150,
            "temperature": 0.7
        })
    );
}

#[test]
fn test_openrouter_reply_parsing() {
    let reply: OpenAIResponse = serde_json::from_value(json!({
        "id": "gen-1712345678-abcdef",
        "provider": "OpenAI",
        "model": "openai/gpt-3.5-turbo",
        "object": "chat.completion",
        "created": 1712345678,
        "choices": [{
            "logprobs": null,
            "finish_reason": "stop",
            "index": 0,
            "message": { "role": "assistant", "content": "Hello! How can I help?", "refusal": null }
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 7, "total_tokens": 16 }
    }))
    .unwrap();

    assert_eq!(reply.first_text().as_deref(), Some("Hello! How can I help?"));
    assert_eq!(reply.total_tokens(), 16);
    assert_eq!(reply.choices[0].finish_reason.as_deref(), Some("stop"));
}

#[test]
fn test_reply_with_content_parts() {
    let reply: OpenAIResponse = serde_json::from_value(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": [{ "type": "text", "text": "part one, " }, { "type": "text", "text": "part two" }]
            }
        }]
    }))
    .unwrap();

    assert_eq!(reply.first_text().as_deref(), Some("part one, part two"));
}

#[test]
fn test_reply_mixing_text_and_unknown_parts() {
    let reply: OpenAIResponse = serde_json::from_value(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": [
                    { "type": "text", "text": "visible" },
                    { "type": "image_url", "image_url": { "url": "https://example.com/a.png" } },
                    { "type": "refusal", "refusal": "n/a" }
                ]
            }
        }],
        "usage": { "total_tokens": 12 }
    }))
    .unwrap();

    assert_eq!(reply.first_text().as_deref(), Some("visible"));
    assert_eq!(reply.total_tokens(), 12);
}

#[test]
fn test_reply_without_choices() {
    let reply: OpenAIResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
    assert_eq!(reply.first_text(), None);
}

#[test]
fn test_upstream_error_body_parsing() {
    let body: OpenAIErrorResponse = serde_json::from_value(json!({
        "error": { "message": "User not found.", "code": 401 }
    }))
    .unwrap();
    assert_eq!(body.error.message, "User not found.");
    assert_eq!(body.error.code, Some(json!(401)));

    let body: OpenAIErrorResponse = serde_json::from_value(json!({
        "error": { "message": "Invalid key", "type": "invalid_request_error", "code": "invalid_api_key" }
    }))
    .unwrap();
    assert_eq!(body.error.error_type.as_deref(), Some("invalid_request_error"));
}
