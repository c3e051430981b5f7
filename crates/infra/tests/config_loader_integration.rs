//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::time::Duration;

use playfab_domain::constants::DEFAULT_BASE_URL;
use playfab_domain::PlayFabError;
use playfab_infra::config;
use tempfile::{NamedTempFile, TempDir};

fn write_temp(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "secret_key": "json-secret",
        "title_id": "ABCD",
        "catalog_version": "main",
        "transport": {
            "max_connections": 20,
            "timeout_secs": 4
        },
        "retry": {
            "max_retries": 5,
            "backoff_ms": 250
        }
    }"#;
    let path = write_temp(json_content, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file");

    let config = result.unwrap();

    assert_eq!(config.secret_key.expose(), "json-secret");
    assert_eq!(config.title_id, "ABCD");
    assert_eq!(config.catalog_version, "main");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);

    // Unset transport fields keep their defaults
    assert_eq!(config.transport.max_connections, 20);
    assert_eq!(config.transport.max_connections_per_host, 100);
    assert_eq!(config.transport.timeout(), Duration::from_secs(4));

    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.backoff(), Duration::from_millis(250));
    assert!(config.retry.retry_bad_request);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
secret_key = "toml-secret"
title_id = "EF01"
catalog_version = "season-2"
base_url = "http://localhost:9000/{title_id}"

[retry]
max_retries = 0
retry_bad_request = false
"#;
    let path = write_temp(toml_content, "toml");

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");

    assert_eq!(config.secret_key.expose(), "toml-secret");
    assert_eq!(config.resolved_base_url(), "http://localhost:9000/EF01");
    assert_eq!(config.retry.max_retries, 0);
    assert_eq!(config.retry.max_attempts(), 1);
    assert!(!config.retry.retry_bad_request);
    assert_eq!(config.transport.timeout(), Duration::from_secs(10));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_file_contents_are_config_errors() {
    let bad_json = write_temp("{ not json", "json");
    let missing_field = write_temp("secret_key = \"s\"\ntitle_id = \"ABCD\"\n", "toml");

    for path in [bad_json, missing_field] {
        let result = config::load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(PlayFabError::Config(_))), "{}", path.display());
        std::fs::remove_file(path).ok();
    }
}

#[tokio::test]
async fn test_loaded_config_builds_a_client() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("playfab.toml");
    std::fs::write(
        &path,
        "secret_key = \"s\"\ntitle_id = \"ABCD\"\ncatalog_version = \"main\"\nbase_url = \"http://127.0.0.1:1\"\n",
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("config should load");
    let client = playfab_infra::PlayFabClient::builder(config).build().expect("client should build");

    assert_eq!(client.title_id(), "ABCD");
    assert_eq!(client.endpoint("Server", "GetTitleData").as_str(), "http://127.0.0.1:1/Server/GetTitleData");
}
