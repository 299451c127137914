//! Tests for HttpProvider header construction.

use pbj_provider::{Client, Error, HttpProvider, http::DEFAULT_TIMEOUT};
use std::{collections::BTreeMap, time::Duration};

#[test]
fn bearer_sets_authorization_header() {
    let provider =
        HttpProvider::bearer(Client::new(), "openai", "test-key", "http://example.com/v1/chat")
            .expect("bearer provider");

    let auth = provider
        .headers()
        .get("authorization")
        .expect("authorization header");
    assert_eq!(auth.to_str().unwrap(), "Bearer test-key");
    assert_eq!(provider.endpoint(), "http://example.com/v1/chat");
}

#[test]
fn bearer_rejects_key_with_newline() {
    let err = HttpProvider::bearer(Client::new(), "openai", "bad\nkey", "http://example.com")
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn no_auth_sets_content_type_and_extra_headers() {
    let extra = BTreeMap::from([("x-tenant".to_owned(), "lab".to_owned())]);
    let provider = HttpProvider::no_auth(Client::new(), "llama", "http://localhost:8001", &extra)
        .expect("no-auth provider");

    let ct = provider.headers().get("content-type").expect("content-type");
    assert_eq!(ct.to_str().unwrap(), "application/json");
    let tenant = provider.headers().get("x-tenant").expect("x-tenant");
    assert_eq!(tenant.to_str().unwrap(), "lab");
    assert!(provider.headers().get("authorization").is_none());
}

#[test]
fn default_timeout_is_two_minutes() {
    let provider =
        HttpProvider::no_auth(Client::new(), "llama", "http://localhost", &BTreeMap::new())
            .unwrap();
    assert_eq!(provider.timeout(), DEFAULT_TIMEOUT);
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(120));

    let provider = provider.with_timeout(Duration::from_secs(5));
    assert_eq!(provider.timeout(), Duration::from_secs(5));
}
