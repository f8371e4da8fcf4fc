//! Request body extraction
//!
//! Accepts chat requests as JSON or URL-encoded forms and reports body
//! problems in the gateway's `{ "error": ... }` shape

use crate::models::chat::ChatRequest;
use crate::utils::error::{helpers, AppError};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};

/// Chat request decoded from the body
#[derive(Debug, Clone)]
pub struct ChatPayload(pub ChatRequest);

#[async_trait]
impl<S> FromRequest<S> for ChatPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let request = if is_form {
            Form::<ChatRequest>::from_request(req, state)
                .await
                .map(|Form(request)| request)
                .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?
        } else {
            Json::<ChatRequest>::from_request(req, state)
                .await
                .map(|Json(request)| request)
                .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?
        };

        Ok(ChatPayload(request))
    }
}

fn body_error(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        helpers::bad_request(format!("Invalid request body: {}", detail))
    }
}
