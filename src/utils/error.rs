//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::chat::ErrorBody;
use crate::services::client::UpstreamError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application error types
///
/// The `Display` text of each variant is the `error` string sent to the
/// browser, so it is worded for end users.
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller sent an unusable request
    #[error("{0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Gateway deployment is missing required configuration
    #[error("{0}")]
    Configuration(String),

    /// Upstream rejected the configured credential
    #[error("Invalid OpenRouter API key")]
    InvalidCredential,

    /// Upstream rate limit exceeded
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    /// Upstream did not answer in time
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// Any other upstream or transport failure
    #[error("OpenRouter API error: {0}")]
    Upstream(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Configuration(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) | AppError::PayloadTooLarge => "invalid_request_error",
            AppError::Configuration(_) => "configuration_error",
            AppError::InvalidCredential => "authentication_error",
            AppError::RateLimit => "rate_limit_error",
            AppError::Timeout => "timeout_error",
            AppError::Upstream(_) => "upstream_error",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(
            self,
            AppError::BadRequest(_) | AppError::PayloadTooLarge | AppError::InvalidCredential
        )
    }

    /// Convert to the `{ "error": ... }` body
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized => AppError::InvalidCredential,
            UpstreamError::RateLimited => AppError::RateLimit,
            UpstreamError::Timeout => AppError::Timeout,
            UpstreamError::Api { message, .. } => AppError::Upstream(message),
            UpstreamError::Transport(e) => AppError::Upstream(e.to_string()),
            UpstreamError::Decode(message) => AppError::Upstream(message),
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.should_log_details() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create bad request error
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::BadRequest(message.into())
    }

    /// Error returned when the request has no message
    pub fn missing_message() -> AppError {
        bad_request("Message is required")
    }

    /// Error returned when no usable API key is configured
    pub fn missing_credential() -> AppError {
        AppError::Configuration(
            "OpenRouter API key not configured. Please set OPENROUTER_API_KEY in .env file."
                .to_string(),
        )
    }

    /// Create upstream error
    pub fn upstream_error(message: impl Into<String>) -> AppError {
        AppError::Upstream(message.into())
    }
}
