//! HTTP client service
//!
//! Encapsulates HTTP communication with the upstream completion API

use crate::config::settings::UpstreamConfig;
use crate::models::openai::*;
use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Classified failure of an upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream answered 401
    #[error("upstream rejected the API key")]
    Unauthorized,

    /// Upstream answered 429
    #[error("upstream rate limit exceeded")]
    RateLimited,

    /// No reply within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Any other non-success status
    #[error("upstream returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Connection-level failure
    #[error("upstream transport error: {0}")]
    Transport(reqwest::Error),

    /// Success status with a body we could not use
    #[error("invalid upstream reply: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// OpenRouter-compatible completion client
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: UpstreamConfig,
}

impl OpenRouterClient {
    /// Create a new client instance
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("chat-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Send chat completion request
    pub async fn chat_completions(
        &self,
        api_key: &str,
        request: &OpenAIRequest,
    ) -> Result<OpenAIResponse, UpstreamError> {
        let url = self.config.completions_url();
        debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> Result<OpenAIResponse, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            let reply: OpenAIResponse = serde_json::from_slice(&body)
                .map_err(|e| UpstreamError::Decode(e.to_string()))?;

            debug!("Upstream request completed successfully");
            return Ok(reply);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("Upstream request failed: {} - {}", status, error_text);

        Err(classify_status(status, &error_text))
    }
}

/// Map a non-success status and its body to an upstream error
pub fn classify_status(status: StatusCode, body: &str) -> UpstreamError {
    match status {
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
        _ => {
            let message = serde_json::from_str::<OpenAIErrorResponse>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));

            UpstreamError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}
