//! Provider management commands

use crate::Config;
use anyhow::{Context, Result, bail};
use clap::Args;
use provider::{ProviderKind, ProviderStore};
use std::{io::Read, path::Path};

/// Key command arguments
#[derive(Debug, Args)]
pub struct KeyCmd {
    /// Provider name
    pub name: String,

    /// The API key (read from stdin when omitted)
    pub key: Option<String>,

    /// Remove the stored key
    #[arg(long, conflicts_with = "key")]
    pub clear: bool,
}

impl KeyCmd {
    /// Run the key command
    pub fn run(&self, path: &Path) -> Result<()> {
        let key = match (&self.key, self.clear) {
            (_, true) => None,
            (Some(key), false) => Some(key.clone()),
            (None, false) => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read key from stdin")?;
                Some(input)
            }
        };
        edit(path, |store| set_key(store, &self.name, key))
    }
}

/// Load the file as written, apply `f` to its providers and save it back.
pub fn edit(path: &Path, f: impl FnOnce(&ProviderStore) -> Result<()>) -> Result<()> {
    let store = Config::read(path)?.store();
    f(&store)?;
    Config::from(&store).save(path)
}

/// Enable or disable a provider.
pub fn set_enabled(store: &ProviderStore, name: &str, enabled: bool) -> Result<()> {
    if !store.set_enabled(name, enabled) {
        bail!("unknown provider '{name}'");
    }
    let state = if enabled { "enabled" } else { "disabled" };
    tracing::info!("provider '{name}' {state}");
    Ok(())
}

/// Set a provider's API key. A blank or absent key clears it.
pub fn set_key(store: &ProviderStore, name: &str, key: Option<String>) -> Result<()> {
    let Some(config) = store.get(name) else {
        bail!("unknown provider '{name}'");
    };
    if config.kind == ProviderKind::LocalHttp {
        tracing::warn!("provider '{name}' is local_http and never sends its api_key");
    }
    let key = key
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty());
    store.set_api_key(name, key);
    Ok(())
}

/// Show only the last four characters of a key.
pub fn mask_key(key: Option<&str>) -> String {
    let Some(key) = key else {
        return "No API Key".into();
    };
    let tail = key.char_indices().rev().nth(3).map_or(key, |(idx, _)| &key[idx..]);
    format!("API Key: …{tail}")
}
