//! Health check handler
//!
//! GET /api/health

use crate::models::chat::HealthResponse;
use axum::response::Json;
use chrono::{SecondsFormat, Utc};
use tracing::debug;

/// Basic health check
///
/// Always 200; does not contact the upstream.
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
