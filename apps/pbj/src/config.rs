//! Configuration for the CLI

use anyhow::{Context, Result};
use provider::{ProviderConfig, ProviderKind, ProviderStore};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Default local server URL, as exposed by `llama_cpp.server`.
pub const LOCAL_ENDPOINT: &str = "http://localhost:8001/v1/chat/completions";

/// CLI configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Provider configs keyed by provider name.
    #[serde(default)]
    pub provider: BTreeMap<String, ProviderConfig>,
}

impl Config {
    /// Default path: `~/.config/pbj.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not resolve the home directory")?;
        Ok(home.join(".config").join("pbj.toml"))
    }

    /// Load the configuration from a file.
    ///
    /// `${VAR}` references are expanded from the environment, then remote
    /// providers without a key pick one up from `<NAME>_API_KEY` (read from
    /// `.env` or the environment).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if let Ok(dotenv) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", dotenv.display());
        }
        let expanded = crate::utils::expand_env_vars(&content);
        let mut config =
            Self::parse(&expanded).with_context(|| format!("invalid {}", path.display()))?;
        config.resolve_keys(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read the file as written, without `${VAR}` expansion or key
    /// resolution, so saving it back keeps references intact.
    ///
    /// A missing file reads as the default configuration.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid {}", path.display()))
    }

    /// Parse an already-expanded TOML string. Provider names come from the
    /// table keys.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(toml_str)?;
        for (name, provider) in config.provider.iter_mut() {
            provider.name = name.as_str().into();
        }
        Ok(config)
    }

    /// Fill missing remote API keys from `lookup(<NAME>_API_KEY)`.
    ///
    /// Keys already present in the file are never overwritten.
    pub fn resolve_keys(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for provider in self.provider.values_mut() {
            if provider.kind != ProviderKind::RemoteApi || provider.key().is_some() {
                continue;
            }
            let var = provider.key_var();
            if let Some(key) = lookup(&var).filter(|k| !k.trim().is_empty()) {
                tracing::debug!("using {var} for provider '{}'", provider.name);
                provider.api_key = Some(key);
            }
        }
    }

    /// Save the configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("configuration saved to {}", path.display());
        Ok(())
    }

    /// Build a provider store from the configured providers.
    pub fn store(&self) -> ProviderStore {
        ProviderStore::from_configs(self.provider.values().cloned())
    }
}

impl From<&ProviderStore> for Config {
    fn from(store: &ProviderStore) -> Self {
        Self {
            provider: store
                .configs()
                .into_iter()
                .map(|config| (config.name.to_string(), config))
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut openai = ProviderConfig::remote("openai", "gpt-4o-mini", None);
        openai.enabled = false;
        let llama = ProviderConfig::local("llama", "llama3", Some(LOCAL_ENDPOINT));

        Self {
            provider: [openai, llama]
                .into_iter()
                .map(|config| (config.name.to_string(), config))
                .collect(),
        }
    }
}
