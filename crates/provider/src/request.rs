//! OpenAI-compatible chat completions request body.
//!
//! Shared by the remote and local transports: both send the same four
//! fields and a single user message.

use crate::ProviderConfig;
use serde::Serialize;

/// A chat message on the wire.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    /// Message role. Always `user` for outgoing prompts.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The messages to send.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl Request {
    /// Build the request body for a single prompt.
    pub fn prompt(params: &Params, prompt: &str) -> Self {
        Self {
            model: params.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// Generation parameters captured from a [`ProviderConfig`] at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl From<&ProviderConfig> for Params {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}
