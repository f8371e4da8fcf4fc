//! Services module
//!
//! Contains the upstream HTTP client and the chat gateway logic

pub mod chat;
pub mod client;

pub use chat::ChatService;
pub use client::{OpenRouterClient, UpstreamError};
