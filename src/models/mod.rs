//! Data models module
//!
//! Defines the gateway's own wire types and the upstream completion API structures

pub mod chat;
pub mod openai;

pub use chat::{ChatRequest, ChatResponse, ErrorBody, HealthResponse};
