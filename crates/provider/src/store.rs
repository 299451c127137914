//! `ProviderStore`: concurrent-safe named provider config map.

use crate::{DispatchContext, ProviderConfig};
use compact_str::CompactString;
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};

/// Holds provider configs keyed by name.
///
/// Names are unique by construction: inserting a config under an existing
/// name replaces it. [`ProviderStore::context`] snapshots the enabled
/// providers, so callers never hold the lock during a dispatch.
#[derive(Clone, Default)]
pub struct ProviderStore {
    inner: Arc<RwLock<BTreeMap<CompactString, ProviderConfig>>>,
}

/// Info about a single provider returned by `list()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEntry {
    /// Provider name (key).
    pub name: CompactString,
    /// Transport kind.
    pub kind: crate::ProviderKind,
    /// Model identifier.
    pub model: CompactString,
    /// Whether the provider takes part in a dispatch.
    pub enabled: bool,
    /// Whether its config carries a key or endpoint as its kind requires.
    pub eligible: bool,
    /// API key, if set and not blank.
    pub api_key: Option<String>,
    /// Endpoint override, if set and not blank.
    pub endpoint: Option<String>,
}

impl ProviderStore {
    /// Create a store from a list of configs. Later duplicates win.
    pub fn from_configs(configs: impl IntoIterator<Item = ProviderConfig>) -> Self {
        let store = Self::default();
        for config in configs {
            store.insert(config);
        }
        store
    }

    /// Add or replace a provider config. Returns the replaced config.
    pub fn insert(&self, config: ProviderConfig) -> Option<ProviderConfig> {
        self.inner.write().insert(config.name.clone(), config)
    }

    /// Get a clone of a provider's config.
    pub fn get(&self, name: &str) -> Option<ProviderConfig> {
        self.inner.read().get(name).cloned()
    }

    /// Enable or disable a provider. Returns false if the name is unknown.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        self.update(name, |config| config.enabled = enabled)
    }

    /// Set or clear a provider's API key. Returns false if the name is unknown.
    pub fn set_api_key(&self, name: &str, key: Option<String>) -> bool {
        self.update(name, |config| config.api_key = key)
    }

    fn update(&self, name: &str, f: impl FnOnce(&mut ProviderConfig)) -> bool {
        match self.inner.write().get_mut(name) {
            Some(config) => {
                f(config);
                true
            }
            None => false,
        }
    }

    /// Clones of all enabled configs, sorted by name.
    pub fn enabled(&self) -> Vec<ProviderConfig> {
        self.inner
            .read()
            .values()
            .filter(|config| config.enabled)
            .cloned()
            .collect()
    }

    /// Clones of all configs, sorted by name.
    pub fn configs(&self) -> Vec<ProviderConfig> {
        self.inner.read().values().cloned().collect()
    }

    /// Clones of the named configs, enabled or not.
    ///
    /// Unknown names are returned in the second vector.
    pub fn select<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> (Vec<ProviderConfig>, Vec<&'n str>) {
        let inner = self.inner.read();
        let mut found = BTreeMap::new();
        let mut missing = Vec::new();
        for name in names {
            match inner.get(name) {
                Some(config) => {
                    found.insert(config.name.clone(), config.clone());
                }
                None => missing.push(name),
            }
        }
        (found.into_values().collect(), missing)
    }

    /// Snapshot the enabled providers into a dispatch context.
    pub fn context(&self, prompt: impl Into<String>) -> DispatchContext {
        DispatchContext::new(prompt, self.enabled())
    }

    /// List all providers.
    pub fn list(&self) -> Vec<ProviderEntry> {
        self.inner
            .read()
            .values()
            .map(|config| ProviderEntry {
                name: config.name.clone(),
                kind: config.kind,
                model: config.model.clone(),
                enabled: config.enabled,
                eligible: config.is_eligible(),
                api_key: config.key().map(str::to_owned),
                endpoint: config.endpoint().map(str::to_owned),
            })
            .collect()
    }

    /// Number of configured providers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no provider is configured.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl std::fmt::Debug for ProviderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ProviderStore")
            .field("providers", &inner.keys().collect::<Vec<_>>())
            .finish()
    }
}
