//! Chat completions response body.

use crate::{Error, Result};
use serde::Deserialize;

/// The subset of a chat completions response we read.
///
/// Extra fields (`id`, `usage`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Completion choices.
    pub choices: Vec<Choice>,
}

/// A completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: Message,
}

/// A generated message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message text. `null` when the model produced nothing.
    #[serde(default)]
    pub content: Option<String>,
}

impl Response {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| Error::Protocol(format!("unexpected response body: {e}")))
    }

    /// The first choice's text, whitespace-trimmed. Missing text is `""`.
    pub fn content(&self) -> Result<String> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| Error::Protocol("response has no choices".into()))?;
        Ok(choice
            .message
            .content
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned())
    }
}
