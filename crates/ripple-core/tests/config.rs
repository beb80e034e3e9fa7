use ripple_core::config::GlobalConfig;
use ripple_core::dependency::Stability;

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert!(config.feeds.is_empty());
    assert_eq!(config.update.timeout_secs, 30);
    assert_eq!(config.update.per_feed_concurrency, 4);
}

#[test]
fn test_global_config_empty_toml_uses_defaults() {
    let config = GlobalConfig::parse_toml("").unwrap();
    assert_eq!(config.update.timeout_secs, 30);
    assert_eq!(config.update.per_feed_concurrency, 4);
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[feeds]
local = { path = "/var/cache/nuget" }
nightly = { path = "/srv/nightly", stability = "stable-only" }

[update]
timeout-secs = 5
per-feed-concurrency = 8
"#;
    let config = GlobalConfig::parse_toml(toml).unwrap();
    assert_eq!(config.update.timeout_secs, 5);
    assert_eq!(config.update.per_feed_concurrency, 8);

    let local = &config.feeds["local"];
    assert_eq!(local.path.to_str(), Some("/var/cache/nuget"));
    assert_eq!(local.stability, None);
    assert_eq!(local.effective_stability(), Stability::Anything);

    let nightly = &config.feeds["nightly"];
    assert_eq!(nightly.effective_stability(), Stability::StableOnly);
}

#[test]
fn test_global_config_missing_file_is_default() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(config.feeds.is_empty());
}

#[test]
fn test_global_config_bad_toml_is_error() {
    let err = GlobalConfig::parse_toml("[update]\ntimeout-secs = \"soon\"").unwrap_err();
    assert!(err.to_string().contains("Config error"), "got: {err}");
}
