//! Chat Gateway Server
//!
//! Serves the chat front end and forwards `/api/chat` messages upstream

use anyhow::{Context, Result};
use chat_gateway::{create_router, utils::logging::init_logging, version_info, Settings};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    if settings.upstream.credential().is_none() {
        warn!("OpenRouter API key not configured. Please set OPENROUTER_API_KEY in .env file.");
        warn!("Chat requests will fail until a key is provided.");
    }

    let index = settings.frontend.index_file();
    if !index.is_file() {
        warn!("Front-end entry document not found: {}", index.display());
    }

    let app = create_router(settings.clone()).await?;

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Chat gateway started on http://{}", addr);
    info!("📝 Health check: http://{}/api/health", addr);
    info!("💬 Chat endpoint: http://{}/api/chat", addr);
    info!("📁 Serving frontend from: {}", settings.frontend.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Completes when Ctrl+C or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
