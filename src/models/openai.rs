//! OpenAI-compatible completion API data models
//!
//! Request and reply structures for the upstream `/chat/completions` endpoint

use serde::{Deserialize, Serialize};

/// Upstream completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIRequest {
    /// Model name
    pub model: String,
    /// Message list
    pub messages: Vec<OpenAIMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    #[serde(default)]
    pub content: Option<OpenAIContent>,
}

/// Message content (plain string or content array)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAIContent {
    /// Simple text content
    Text(String),
    /// Content array
    Array(Vec<OpenAIContentPart>),
}

/// Content part of a reply
///
/// Some providers behind OpenRouter answer with a part array; only the text
/// parts carry reply text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OpenAIContentPart {
    /// Text part
    #[serde(rename = "text")]
    Text { text: String },
    /// Any other part type
    #[serde(other)]
    Other,
}

/// Upstream completion reply
///
/// Only `choices` is required; OpenRouter and compatible providers differ on
/// the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIResponse {
    /// Response ID
    #[serde(default)]
    pub id: Option<String>,
    /// Model that actually served the request
    #[serde(default)]
    pub model: Option<String>,
    /// Choice list
    pub choices: Vec<OpenAIChoice>,
    /// Usage statistics
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// Completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: OpenAIMessage,
    /// Finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIUsage {
    /// Prompt token count
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion token count
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total token count
    #[serde(default)]
    pub total_tokens: u32,
}

/// Upstream error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIErrorResponse {
    /// Error information
    pub error: OpenAIError,
}

/// Upstream error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIError {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error code, numeric on OpenRouter and a string elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}

impl OpenAIMessage {
    /// Single user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(OpenAIContent::Text(content.into())),
        }
    }
}

impl OpenAIContent {
    /// Extract text content
    pub fn extract_text(&self) -> String {
        match self {
            OpenAIContent::Text(text) => text.clone(),
            OpenAIContent::Array(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    OpenAIContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

impl OpenAIResponse {
    /// Text of the first choice, if the reply has one
    ///
    /// A choice whose content is null yields an empty string.
    pub fn first_text(&self) -> Option<String> {
        self.choices.first().map(|choice| {
            choice
                .message
                .content
                .as_ref()
                .map(OpenAIContent::extract_text)
                .unwrap_or_default()
        })
    }

    /// Reported total token count, 0 when the reply carries no usage
    pub fn total_tokens(&self) -> u32 {
        self.usage.as_ref().map_or(0, |usage| usage.total_tokens)
    }
}
