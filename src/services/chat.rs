//! Chat gateway service
//!
//! Validates a browser chat request, forwards it upstream as a single user
//! turn and shapes the reply

use crate::config::Settings;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::openai::{OpenAIMessage, OpenAIRequest, OpenAIResponse};
use crate::services::client::OpenRouterClient;
use crate::utils::error::{helpers, AppResult};
use crate::utils::logging::truncate_content;
use anyhow::Result;
use tracing::{debug, info};

/// Generation budget for every completion
pub const MAX_TOKENS: u32 = 150;

/// Sampling temperature for every completion
pub const TEMPERATURE: f32 = 0.7;

/// Chat gateway service
#[derive(Debug, Clone)]
pub struct ChatService {
    client: OpenRouterClient,
    settings: Settings,
}

impl ChatService {
    /// Create a new service instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = OpenRouterClient::new(settings.upstream.clone())?;
        Ok(Self { client, settings })
    }

    /// Forward one chat message upstream
    ///
    /// Fails without contacting the upstream when the message is empty or
    /// no usable API key is configured.
    pub async fn complete(&self, request: ChatRequest) -> AppResult<ChatResponse> {
        let message = request.message_text().ok_or_else(helpers::missing_message)?;

        let api_key = self
            .settings
            .upstream
            .credential()
            .ok_or_else(helpers::missing_credential)?;

        let model = self.settings.resolve_model(request.model.as_deref());
        debug!("Chat message: {}", truncate_content(message, 200));
        info!("Forwarding chat request to upstream model: {}", model);

        let upstream_request = build_upstream_request(&model, message);
        let reply = self.client.chat_completions(api_key, &upstream_request).await?;

        let response = shape_reply(model, &reply)?;
        info!(
            model = %response.model,
            tokens_used = response.tokens_used,
            "Upstream reply received ({} tokens used)",
            response.tokens_used
        );

        Ok(response)
    }
}

/// Build the upstream request for a single user message
pub fn build_upstream_request(model: &str, message: &str) -> OpenAIRequest {
    OpenAIRequest {
        model: model.to_string(),
        messages: vec![OpenAIMessage::user(message)],
        max_tokens: Some(MAX_TOKENS),
        temperature: Some(TEMPERATURE),
    }
}

/// Turn an upstream reply into the gateway response
pub fn shape_reply(model: String, reply: &OpenAIResponse) -> AppResult<ChatResponse> {
    let response = reply
        .first_text()
        .ok_or_else(|| helpers::upstream_error("upstream reply contained no choices"))?;

    Ok(ChatResponse {
        model,
        response,
        tokens_used: reply.total_tokens(),
    })
}
