//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod extract;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::ChatService;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub chat: ChatService,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let chat = ChatService::new(settings.clone())?;

    let app_state = Arc::new(AppState { chat });

    // Unmatched paths get the SPA entry document
    let frontend = ServeDir::new(&settings.frontend.static_dir)
        .fallback(ServeFile::new(settings.frontend.index_file()));

    let mut router = Router::new()
        // Non-POST methods on the chat path still reach the SPA
        .route(
            "/api/chat",
            post(chat::handle_chat).fallback_service(frontend.clone()),
        )
        .route("/api/health", get(health::health_check))
        .fallback_service(frontend)
        .layer(middleware::from_fn(request_logging_middleware))
        // Oversized bodies surface as extractor rejections, rendered as `{error}`
        .layer(DefaultBodyLimit::max(settings.request.max_request_size))
        .layer(TraceLayer::new_for_http());

    if settings.security.cors_enabled {
        router = router.layer(cors_layer(&settings.security.allowed_origins));
    }

    Ok(router.with_state(app_state))
}

/// Build the CORS layer from the configured origins
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
