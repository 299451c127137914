//! Tests for the provider management commands.

use clap::Parser;
use pbj::{
    App, Command, Config,
    manage::{edit, mask_key, set_enabled, set_key},
};

#[test]
fn enable_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pbj.toml");
    Config::default().save(&path).unwrap();

    edit(&path, |store| set_enabled(store, "openai", true)).unwrap();
    edit(&path, |store| set_enabled(store, "llama", false)).unwrap();

    let config = Config::read(&path).unwrap();
    assert!(config.provider["openai"].enabled);
    assert!(!config.provider["llama"].enabled);
}

#[test]
fn edit_on_missing_file_starts_from_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pbj.toml");

    edit(&path, |store| set_key(store, "openai", Some(" sk-new \n".into()))).unwrap();

    let config = Config::read(&path).unwrap();
    assert_eq!(config.provider["openai"].key(), Some("sk-new"));
    assert!(config.provider.contains_key("llama"));
}

#[test]
fn unknown_provider_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pbj.toml");
    Config::default().save(&path).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = edit(&path, |store| set_enabled(store, "claude", true)).unwrap_err();
    assert!(err.to_string().contains("claude"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn edit_keeps_env_references() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pbj.toml");
    std::fs::write(
        &path,
        r#"
[provider.openai]
model = "gpt-4o-mini"
api_key = "${PBJ_TEST_OPENAI_KEY}"
enabled = false
"#,
    )
    .unwrap();

    edit(&path, |store| set_enabled(store, "openai", true)).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("${PBJ_TEST_OPENAI_KEY}"), "{written}");
    assert!(Config::read(&path).unwrap().provider["openai"].enabled);
}

#[test]
fn blank_key_clears() {
    let config = Config::parse(
        r#"
[provider.openai]
model = "gpt-4o-mini"
api_key = "sk-file"
"#,
    )
    .unwrap();
    let store = config.store();
    set_key(&store, "openai", Some("   ".into())).unwrap();
    assert_eq!(store.get("openai").unwrap().api_key, None);
    set_key(&store, "openai", Some("sk-2".into())).unwrap();
    set_key(&store, "openai", None).unwrap();
    assert_eq!(store.get("openai").unwrap().api_key, None);
}

#[test]
fn mask_key_shows_last_four() {
    assert_eq!(mask_key(None), "No API Key");
    assert_eq!(mask_key(Some("sk-abcdef1234")), "API Key: …1234");
    assert_eq!(mask_key(Some("abc")), "API Key: …abc");
}

#[test]
fn parses_management_commands() {
    let app = App::try_parse_from(["pbj", "enable", "openai", "gemma"]).unwrap();
    let Command::Enable { names } = app.command else {
        panic!("expected enable command");
    };
    assert_eq!(names, vec!["openai", "gemma"]);
    assert!(App::try_parse_from(["pbj", "disable"]).is_err());

    let app = App::try_parse_from(["pbj", "key", "openai", "--clear"]).unwrap();
    let Command::Key(cmd) = app.command else {
        panic!("expected key command");
    };
    assert!(cmd.clear);
    assert!(cmd.key.is_none());

    assert!(App::try_parse_from(["pbj", "key", "openai", "sk", "--clear"]).is_err());
}
