//! Shared HTTP transport for chat completions providers.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers,
//! endpoint URL and request timeout. Both the remote API and the local HTTP
//! provider send through it, so status, timeout and body handling are the
//! same for every backend.

use crate::{Error, Request, Response, Result};
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::BTreeMap, time::Duration};

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of an error body quoted back in a [`Error::Network`].
const ERROR_BODY_LIMIT: usize = 256;

/// Shared HTTP transport for chat completions providers.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    timeout: Duration,
}

impl HttpProvider {
    /// Create a transport with Bearer token authentication.
    pub fn bearer(client: Client, name: &str, key: &str, endpoint: &str) -> Result<Self> {
        let mut headers = json_headers();
        let auth = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| Error::config(name, "api_key contains invalid header characters"))?;
        headers.insert(header::AUTHORIZATION, auth);
        Ok(Self::new(client, headers, endpoint))
    }

    /// Create a transport without authentication, plus extra headers.
    pub fn no_auth(
        client: Client,
        name: &str,
        endpoint: &str,
        extra: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let mut headers = json_headers();
        for (key, value) in extra {
            let key = key
                .parse::<HeaderName>()
                .map_err(|_| Error::config(name, format!("invalid header name '{key}'")))?;
            let value = value
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(name, format!("invalid value for header '{key}'")))?;
            headers.insert(key, value);
        }
        Ok(Self::new(client, headers, endpoint))
    }

    fn new(client: Client, headers: HeaderMap, endpoint: &str) -> Self {
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a request and return the first choice's trimmed text.
    ///
    /// A non-2xx status is terminal; there is no retry.
    pub async fn send(&self, body: &Request) -> Result<String> {
        if let Ok(json) = serde_json::to_string(body) {
            tracing::trace!("request to {}: {json}", self.endpoint);
        }
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Network(format!(
                "{} returned {status}: {}",
                self.endpoint,
                truncate(text.trim(), ERROR_BODY_LIMIT)
            )));
        }

        Response::parse(&text)?.content()
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // headers carry the API key
        f.debug_struct("HttpProvider")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
