//! Static provider registry.
//!
//! Maps known provider names to the transport they speak. The factory
//! resolves every config against it once; adding a provider means adding
//! an entry here.

use crate::{ProviderKind, remote::endpoint};
use compact_str::CompactString;
use std::collections::BTreeMap;

/// What the factory knows about a provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// The only kind this provider may be configured with.
    pub kind: ProviderKind,
    /// Endpoint used when the config does not override it.
    pub endpoint: Option<&'static str>,
}

impl Entry {
    /// A hosted API entry with its well-known endpoint.
    pub const fn remote(endpoint: &'static str) -> Self {
        Self {
            kind: ProviderKind::RemoteApi,
            endpoint: Some(endpoint),
        }
    }

    /// A local HTTP entry. The endpoint always comes from the config.
    pub const fn local() -> Self {
        Self {
            kind: ProviderKind::LocalHttp,
            endpoint: None,
        }
    }
}

/// Built-in providers.
const BUILTIN: &[(&str, Entry)] = &[
    ("openai", Entry::remote(endpoint::OPENAI)),
    ("llama", Entry::local()),
    ("gemma", Entry::local()),
];

/// Provider name to [`Entry`] map. Names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<CompactString, Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn with(mut self, name: &str, entry: Entry) -> Self {
        self.entries.insert(key(name), entry);
        self
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(&key(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(CompactString::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |registry, (name, entry)| {
                registry.with(name, *entry)
            })
    }
}

fn key(name: &str) -> CompactString {
    CompactString::from(name.trim().to_lowercase())
}
