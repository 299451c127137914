//! Provider error taxonomy.
//!
//! Every variant except [`Error::NoTargets`] is caught at the provider
//! boundary by the dispatcher and stored in that provider's result slot.

use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while building or running a provider client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or invalid (credential, endpoint,
    /// header, generation parameter).
    #[error("provider '{provider}' is misconfigured: {reason}")]
    Configuration {
        /// Provider name.
        provider: CompactString,
        /// What is wrong, phrased as a hint for the user.
        reason: String,
    },

    /// The provider name is unknown or its kind has no implementation.
    #[error("unsupported provider '{provider}': {reason}")]
    UnsupportedProvider {
        /// Provider name.
        provider: CompactString,
        /// Why the factory rejected it.
        reason: String,
    },

    /// Transport failure, non-2xx status or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The response body does not follow the chat completions schema.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A dispatch was requested with no target providers.
    #[error("no providers to dispatch to")]
    NoTargets,

    /// The task running a provider panicked or was aborted.
    #[error("provider task failed: {0}")]
    Task(String),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`].
    pub fn config(provider: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`Error::UnsupportedProvider`].
    pub fn unsupported(provider: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::Protocol(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
