//! End-to-end smoke test
//!
//! Serves the real front end on an ephemeral port and walks through what
//! the browser does: load the page, then post a chat message

use chat_gateway::config::Settings;
use chat_gateway::handlers::create_router;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

async fn spawn_gateway(settings: Settings) -> SocketAddr {
    let app = create_router(settings).await.expect("Failed to create router");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_browser_flow_against_bundled_frontend() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Hello from the model" } }],
                "usage": { "total_tokens": 12 }
            }));
        })
        .await;

    let mut settings = Settings::default();
    settings.upstream.api_key = Some("sk-or-v1-smoke-test".to_string());
    settings.upstream.base_url = upstream.url("/api/v1");
    settings.frontend.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("bin/frontend");

    let addr = spawn_gateway(settings).await;
    let client = reqwest::Client::new();

    let page = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("id=\"chat-input\""));
    assert!(page.contains("id=\"send-button\""));

    let script = client
        .get(format!("http://{}/webapp.js", addr))
        .send()
        .await
        .unwrap();
    assert!(script.status().is_success());
    assert!(script.text().await.unwrap().contains("/api/chat"));

    let reply = client
        .post(format!("http://{}/api/chat", addr))
        .json(&json!({ "message": "Hello from E2E test" }))
        .send()
        .await
        .unwrap();
    assert_eq!(reply.status().as_u16(), 200);

    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["response"], "Hello from the model");
    assert_eq!(body["tokensUsed"], 12);
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "ok" } }],
                    "usage": { "total_tokens": 1 }
                }));
        })
        .await;

    let mut settings = Settings::default();
    settings.upstream.api_key = Some("sk-or-v1-smoke-test".to_string());
    settings.upstream.base_url = upstream.url("/api/v1");

    let addr = spawn_gateway(settings).await;
    let client = reqwest::Client::new();
    let started = Instant::now();

    let requests = (0..8).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .post(format!("http://{}/api/chat", addr))
                .json(&json!({ "message": format!("message {}", i) }))
                .send()
                .await
                .unwrap()
                .status()
                .as_u16()
        })
    });

    for handle in requests.collect::<Vec<_>>() {
        assert_eq!(handle.await.unwrap(), 200);
    }

    // Eight 200ms upstream calls in sequence would take at least 1.6s
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_millis(1200), "requests were serialized: {:?}", elapsed);

    mock.assert_hits_async(8).await;
}
