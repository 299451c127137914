//! Tests for `ProviderStore`.

use pbj_provider::{ProviderConfig, ProviderKind, ProviderStore};

fn test_store() -> ProviderStore {
    let mut openai = ProviderConfig::remote("openai", "gpt-4o-mini", None);
    openai.enabled = false;
    ProviderStore::from_configs([
        openai,
        ProviderConfig::local("llama", "llama3", Some("http://localhost:8001")),
    ])
}

#[test]
fn insert_replaces_same_name() {
    let store = test_store();
    let replaced = store.insert(ProviderConfig::local("llama", "llama3.1", Some("http://x")));
    assert_eq!(replaced.unwrap().model.as_str(), "llama3");
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("llama").unwrap().model.as_str(), "llama3.1");
}

#[test]
fn enabled_filters_disabled() {
    let store = test_store();
    let enabled: Vec<String> = store.enabled().into_iter().map(|c| c.name.to_string()).collect();
    assert_eq!(enabled, vec!["llama"]);

    assert!(store.set_enabled("openai", true));
    assert_eq!(store.enabled().len(), 2);
    assert!(!store.set_enabled("nonexistent", true));
}

#[test]
fn set_api_key_makes_remote_eligible() {
    let store = test_store();
    let openai = |store: &ProviderStore| {
        store
            .list()
            .into_iter()
            .find(|e| e.name == "openai")
            .unwrap()
    };
    assert!(!openai(&store).eligible);
    assert!(store.set_api_key("openai", Some("sk-test".into())));
    let entry = openai(&store);
    assert!(entry.eligible);
    assert_eq!(entry.kind, ProviderKind::RemoteApi);
}

#[test]
fn select_returns_disabled_and_reports_unknown() {
    let store = test_store();
    let (found, missing) = store.select(["openai", "nope"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.as_str(), "openai");
    assert_eq!(missing, vec!["nope"]);
}

#[test]
fn context_snapshots_enabled_providers() {
    let store = test_store();
    let ctx = store.context("hello");
    assert_eq!(ctx.prompt(), "hello");
    assert_eq!(ctx.len(), 1);

    // later changes do not leak into an existing snapshot
    store.set_enabled("openai", true);
    assert_eq!(ctx.len(), 1);
    assert_eq!(store.context("hello").len(), 2);
}

#[test]
fn configs_returns_every_provider() {
    let store = test_store();
    let names: Vec<String> = store.configs().into_iter().map(|c| c.name.to_string()).collect();
    assert_eq!(names, vec!["llama", "openai"]);
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
}

#[test]
fn list_exposes_key_and_endpoint() {
    let store = test_store();
    store.set_api_key("openai", Some("sk-test".into()));
    let entries = store.list();
    assert_eq!(entries[0].endpoint.as_deref(), Some("http://localhost:8001"));
    assert_eq!(entries[1].api_key.as_deref(), Some("sk-test"));

    store.set_api_key("openai", Some("  ".into()));
    assert_eq!(store.list()[1].api_key, None);
}
