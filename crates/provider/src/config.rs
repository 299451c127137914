//! Provider configuration
//!
//! One flat record per provider. The transport is selected by `kind`;
//! remote providers authenticate with `api_key`, local providers are
//! reached at `endpoint`. All fields appear at the same level in TOML.

use crate::{Error, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Transport kind of a provider.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hosted chat completions API, authorized by an API key.
    #[default]
    RemoteApi,
    /// OpenAI-compatible server reached over plain HTTP, no key.
    LocalHttp,
}

impl ProviderKind {
    /// Human-readable kind string for logging and listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteApi => "remote_api",
            Self::LocalHttp => "local_http",
        }
    }
}

/// Named provider configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Unique provider name. Filled from the table key when loaded from TOML.
    #[serde(default, skip_serializing)]
    pub name: CompactString,
    /// Transport kind.
    #[serde(default)]
    pub kind: ProviderKind,
    /// API key. Required for `remote_api`, ignored for `local_http`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat completions URL. Required for `local_http`, optional override
    /// for `remote_api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model identifier, forwarded verbatim.
    pub model: CompactString,
    /// Sampling temperature (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whether this provider takes part in a dispatch.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Extra request headers sent by `local_http` providers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Create a remote API provider config with default parameters.
    pub fn remote(name: &str, model: &str, api_key: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: ProviderKind::RemoteApi,
            api_key: api_key.map(ToOwned::to_owned),
            endpoint: None,
            headers: BTreeMap::new(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            enabled: true,
        }
    }

    /// Create a local HTTP provider config with default parameters.
    pub fn local(name: &str, model: &str, endpoint: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: ProviderKind::LocalHttp,
            api_key: None,
            endpoint: endpoint.map(ToOwned::to_owned),
            headers: BTreeMap::new(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            enabled: true,
        }
    }

    /// The API key, treating an empty string as absent.
    pub fn key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// The endpoint, treating an empty string as absent.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Environment variable that supplies this provider's key
    /// (`OPENAI_API_KEY` for `openai`).
    pub fn key_var(&self) -> String {
        format!("{}_API_KEY", self.name.to_uppercase().replace('-', "_"))
    }

    /// Whether the config carries what its kind needs to attempt a call.
    ///
    /// Remote providers may still get their endpoint from the registry.
    pub fn is_eligible(&self) -> bool {
        match self.kind {
            ProviderKind::RemoteApi => self.key().is_some(),
            ProviderKind::LocalHttp => self.endpoint().is_some(),
        }
    }

    /// Validate the generation parameters.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config(
                &self.name,
                format!("temperature {} is outside 0.0..=2.0", self.temperature),
            ));
        }
        if self.max_tokens == 0 {
            return Err(Error::config(&self.name, "max_tokens must be positive"));
        }
        Ok(())
    }
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_true() -> bool {
    true
}
