//! Concurrent prompt fan-out.
//!
//! [`Dispatcher::dispatch`] builds one provider per target, runs every
//! `run_prompt` in its own task and merges the outcomes into a
//! [`DispatchResult`] once all tasks have joined. A failure in one provider
//! is stored in that provider's slot and never touches the others.

use crate::{Error, ProviderConfig, Registry, Result, build_provider};
use compact_str::CompactString;
use reqwest::Client;
use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};
use tokio::task::JoinSet;

/// The prompt and the providers one dispatch targets.
///
/// Configs are snapshots; nothing in a dispatch mutates them.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    prompt: String,
    providers: BTreeMap<CompactString, ProviderConfig>,
}

impl DispatchContext {
    /// Create a context. Providers sharing a name collapse to the last one.
    pub fn new(
        prompt: impl Into<String>,
        providers: impl IntoIterator<Item = ProviderConfig>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            providers: providers
                .into_iter()
                .map(|config| (config.name.clone(), config))
                .collect(),
        }
    }

    /// The prompt sent to every provider.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The targeted providers, sorted by name.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.values()
    }

    /// Number of targeted providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is targeted.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// What happened to one provider in a dispatch.
#[derive(Debug)]
pub enum Outcome {
    /// The model replied. The text is trimmed and may be empty.
    Completed(String),
    /// The provider could not be built, so no call was attempted.
    Skipped(Error),
    /// The call was attempted and failed.
    Failed(Error),
}

impl Outcome {
    /// The completion text, if any.
    pub fn completion(&self) -> Option<&str> {
        match self {
            Self::Completed(text) => Some(text.as_str()),
            Self::Skipped(_) | Self::Failed(_) => None,
        }
    }

    /// The error, if the provider was skipped or failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Completed(_) => None,
            Self::Skipped(err) | Self::Failed(err) => Some(err),
        }
    }

    /// Whether the model replied.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Display text: the completion, or a bracketed error annotation.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(text) => f.write_str(text),
            Self::Skipped(err) => write!(f, "[skipped: {err}]"),
            Self::Failed(err) => write!(f, "[error: {err}]"),
        }
    }
}

/// One outcome per dispatched provider, keyed by name.
#[derive(Debug, Default)]
pub struct DispatchResult {
    outcomes: BTreeMap<CompactString, Outcome>,
}

impl DispatchResult {
    /// Get a provider's outcome.
    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.outcomes.get(name)
    }

    /// Iterate outcomes sorted by provider name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.outcomes.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// Provider names in the result.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outcomes.keys().map(CompactString::as_str)
    }

    /// Number of result slots.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the result has no slots.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of providers that replied.
    pub fn completed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_completed()).count()
    }

    /// Plain name to display text mapping.
    pub fn texts(&self) -> BTreeMap<String, String> {
        self.outcomes
            .iter()
            .map(|(name, outcome)| (name.to_string(), outcome.text()))
            .collect()
    }
}

/// Fans one prompt out to many providers.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: Registry,
    client: Client,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher resolving providers against `registry`.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            client: Client::new(),
            timeout: None,
        }
    }

    /// Override the per-request timeout of every provider.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send the context's prompt to all of its providers concurrently.
    ///
    /// Returns [`Error::NoTargets`] without any I/O if the context has no
    /// providers. Otherwise the result holds exactly one slot per provider.
    pub async fn dispatch(&self, ctx: &DispatchContext) -> Result<DispatchResult> {
        if ctx.is_empty() {
            return Err(Error::NoTargets);
        }
        tracing::debug!("dispatching prompt to {} provider(s)", ctx.len());

        let prompt: Arc<str> = Arc::from(ctx.prompt());
        let mut outcomes = BTreeMap::new();
        let mut calls = Vec::new();

        for config in ctx.providers() {
            let provider = match build_provider(config, &self.registry, self.client.clone()) {
                Ok(provider) => provider,
                Err(err) => {
                    tracing::warn!("skipping provider '{}': {err}", config.name);
                    outcomes.insert(config.name.clone(), Outcome::Skipped(err));
                    continue;
                }
            };
            let provider = match self.timeout {
                Some(timeout) => provider.with_timeout(timeout),
                None => provider,
            };

            let name = config.name.clone();
            let prompt = Arc::clone(&prompt);
            calls.push((name.clone(), async move {
                tracing::debug!("sending prompt to '{name}' at {}", provider.endpoint());
                provider.run_prompt(&prompt).await
            }));
        }

        if calls.is_empty() && outcomes.is_empty() {
            tracing::error!("dispatch built no providers and recorded no failures");
        }

        outcomes.extend(run_all(calls).await);
        Ok(DispatchResult { outcomes })
    }
}

/// Run every call in its own task and wait for all of them.
///
/// Returns one outcome per call. A call whose task panicked or was
/// cancelled gets [`Error::Task`].
async fn run_all<F>(calls: Vec<(CompactString, F)>) -> BTreeMap<CompactString, Outcome>
where
    F: Future<Output = Result<String>> + Send + 'static,
{
    let mut outcomes = BTreeMap::new();
    let mut running = Vec::with_capacity(calls.len());
    let mut tasks = JoinSet::new();
    for (name, call) in calls {
        running.push(name.clone());
        tasks.spawn(async move { (name, call.await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(text))) => {
                tracing::debug!("provider '{name}' replied with {} bytes", text.len());
                outcomes.insert(name, Outcome::Completed(text));
            }
            Ok((name, Err(err))) => {
                tracing::warn!("provider '{name}' failed: {err}");
                outcomes.insert(name, Outcome::Failed(err));
            }
            Err(err) => tracing::error!("provider task failed: {err}"),
        }
    }

    // A task that panicked never reported its name.
    for name in running {
        outcomes.entry(name).or_insert_with(|| {
            Outcome::Failed(Error::Task("task panicked or was cancelled".into()))
        });
    }
    outcomes
}
