//! OpenAI-compatible server reached over plain HTTP (llama.cpp, vLLM, ...).

use crate::{Error, HttpProvider, ProviderConfig, Request, Result, request::Params};
use reqwest::Client;
use std::time::Duration;

/// A provider behind a local OpenAI-compatible `/v1/chat/completions` URL.
#[derive(Clone, Debug)]
pub struct LocalHttp {
    http: HttpProvider,
    params: Params,
}

impl LocalHttp {
    /// Create a provider from its config. Fails if no endpoint is set.
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self> {
        let endpoint = config.endpoint().ok_or_else(|| {
            Error::config(&config.name, "missing endpoint for local_http provider")
        })?;

        Ok(Self {
            http: HttpProvider::no_auth(client, &config.name, endpoint, &config.headers)?,
            params: Params::from(config),
        })
    }

    /// POST the prompt to the endpoint.
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
