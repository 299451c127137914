//! Hosted chat completions API provider.

use crate::{Error, HttpProvider, ProviderConfig, Request, Result, request::Params};
use reqwest::Client;
use std::time::Duration;

/// Hosted endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
}

/// A provider behind a hosted, key-authorized chat completions API.
#[derive(Clone, Debug)]
pub struct RemoteApi {
    http: HttpProvider,
    params: Params,
}

impl RemoteApi {
    /// Create a provider from its config.
    ///
    /// The key is checked here, not on send. `default_endpoint` is used
    /// when the config carries no endpoint override.
    pub fn new(
        client: Client,
        config: &ProviderConfig,
        default_endpoint: Option<&str>,
    ) -> Result<Self> {
        let key = config.key().ok_or_else(|| {
            Error::config(
                &config.name,
                format!(
                    "missing api_key (set {} or add it to the config)",
                    config.key_var()
                ),
            )
        })?;
        let endpoint = config
            .endpoint()
            .or(default_endpoint)
            .ok_or_else(|| Error::config(&config.name, "missing endpoint"))?;

        Ok(Self {
            http: HttpProvider::bearer(client, &config.name, key, endpoint)?,
            params: Params::from(config),
        })
    }

    /// Send the prompt as a single user message.
    pub async fn run_prompt(&self, prompt: &str) -> Result<String> {
        self.http.send(&Request::prompt(&self.params, prompt)).await
    }

    /// The underlying transport.
    pub fn http(&self) -> &HttpProvider {
        &self.http
    }

    /// Override the request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            http: self.http.with_timeout(timeout),
            ..self
        }
    }
}
