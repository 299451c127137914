//! Provider implementation.
//!
//! Unified `Provider` enum with enum dispatch over the two transports.
//! `build_provider()` resolves the config against the [`Registry`] and
//! constructs the matching variant. It performs no I/O.

use crate::{Error, LocalHttp, ProviderConfig, ProviderKind, Registry, RemoteApi, Result};
use reqwest::Client;
use std::time::Duration;

/// Unified LLM provider enum.
#[derive(Clone, Debug)]
pub enum Provider {
    /// Hosted chat completions API.
    RemoteApi(RemoteApi),
    /// Local OpenAI-compatible HTTP server.
    LocalHttp(LocalHttp),
}

impl Provider {
    /// Send `prompt` as a single user message and return the trimmed reply.
    pub async fn run_prompt(&self, prompt: &str) -> Result<String> {
        match self {
            Self::RemoteApi(p) => p.run_prompt(prompt).await,
            Self::LocalHttp(p) => p.run_prompt(prompt).await,
        }
    }

    /// The transport kind of this provider.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::RemoteApi(_) => ProviderKind::RemoteApi,
            Self::LocalHttp(_) => ProviderKind::LocalHttp,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::RemoteApi(p) => p.http().endpoint(),
            Self::LocalHttp(p) => p.http().endpoint(),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match self {
            Self::RemoteApi(p) => Self::RemoteApi(p.with_timeout(timeout)),
            Self::LocalHttp(p) => Self::LocalHttp(p.with_timeout(timeout)),
        }
    }
}

/// Construct a `Provider` from config and a shared HTTP client.
///
/// Fails with [`Error::UnsupportedProvider`] if the name is not registered
/// or the configured kind disagrees with the registry, and surfaces the
/// variant constructor's [`Error::Configuration`] unchanged.
pub fn build_provider(
    config: &ProviderConfig,
    registry: &Registry,
    client: Client,
) -> Result<Provider> {
    let entry = registry.get(&config.name).ok_or_else(|| {
        let known = registry.names().collect::<Vec<_>>().join(", ");
        Error::unsupported(&config.name, format!("unknown provider (known: {known})"))
    })?;
    if entry.kind != config.kind {
        return Err(Error::unsupported(
            &config.name,
            format!(
                "configured as {} but only {} is implemented",
                config.kind.as_str(),
                entry.kind.as_str()
            ),
        ));
    }
    config.validate()?;

    let provider = match entry.kind {
        ProviderKind::RemoteApi => {
            Provider::RemoteApi(RemoteApi::new(client, config, entry.endpoint)?)
        }
        ProviderKind::LocalHttp => Provider::LocalHttp(LocalHttp::new(client, config)?),
    };
    Ok(provider)
}
