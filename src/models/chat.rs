//! Gateway wire types
//!
//! Bodies exchanged with the browser front end on `/api/*`

use serde::{Deserialize, Serialize};

/// Incoming chat request
///
/// Both fields are optional on the wire so that a missing message can be
/// reported as a bad request instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User message
    #[serde(default)]
    pub message: Option<String>,
    /// Upstream model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Chat reply returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Model the request was forwarded to
    pub model: String,
    /// Completion text
    pub response: String,
    /// Total tokens reported by the upstream
    pub tokens_used: u32,
}

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK"
    pub status: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
}

impl ChatRequest {
    /// Request carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            model: None,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Message text, `None` when missing or empty
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
