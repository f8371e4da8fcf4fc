//! Chat handler
//!
//! POST /api/chat

use crate::handlers::extract::ChatPayload;
use crate::handlers::AppState;
use crate::models::chat::ChatResponse;
use crate::utils::error::AppResult;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// Handle a browser chat message
///
/// Returns `{ model, response, tokensUsed }` or an `{ error }` body whose
/// status reflects the failure class.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    ChatPayload(request): ChatPayload,
) -> AppResult<Json<ChatResponse>> {
    debug!("Received chat request (model: {:?})", request.model);

    let response = state.chat.complete(request).await?;
    Ok(Json(response))
}
