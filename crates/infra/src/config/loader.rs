//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the credentials are incomplete, falls back to loading from file
//! 3. Probes the working directory and the executable directory for a file
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PLAYFAB_SECRET_KEY`: Title secret key (required)
//! - `PLAYFAB_TITLE_ID`: Title identifier (required)
//! - `PLAYFAB_CATALOG_VERSION`: Catalog version (required)
//! - `PLAYFAB_BASE_URL`: Base URL template, `{title_id}` is substituted
//! - `PLAYFAB_TIMEOUT_SECS`: Per-call timeout in seconds
//! - `PLAYFAB_MAX_RETRIES`: Retries after the first attempt
//! - `PLAYFAB_RETRY_BACKOFF_MS`: Fixed delay between attempts
//! - `PLAYFAB_RETRY_BAD_REQUEST`: Treat HTTP 400 as transient (true/false)
//!
//! ## File Locations
//! Without an explicit path the loader probes `playfab.toml`, `playfab.json`,
//! `config.toml` and `config.json` in the current directory, then next to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use playfab_domain::{ClientConfig, PlayFabError, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PlayFabError::Config` if neither source yields a configuration.
pub fn load(path: Option<PathBuf>) -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(path)
        }
    }
}

/// Load configuration from the process environment
///
/// # Errors
/// Returns `PlayFabError::Config` if a required variable is missing or an
/// optional one does not parse.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_lookup<F>(lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|value| !value.is_empty()).ok_or_else(|| {
            PlayFabError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let mut config = ClientConfig::new(
        required("PLAYFAB_SECRET_KEY")?,
        required("PLAYFAB_TITLE_ID")?,
        required("PLAYFAB_CATALOG_VERSION")?,
    );

    if let Some(base_url) = lookup("PLAYFAB_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(timeout) = parse_var(&lookup, "PLAYFAB_TIMEOUT_SECS")? {
        config.transport.timeout_secs = timeout;
    }
    if let Some(retries) = parse_var(&lookup, "PLAYFAB_MAX_RETRIES")? {
        config.retry.max_retries = retries;
    }
    if let Some(backoff) = parse_var(&lookup, "PLAYFAB_RETRY_BACKOFF_MS")? {
        config.retry.backoff_ms = backoff;
    }
    if let Some(flag) = lookup("PLAYFAB_RETRY_BAD_REQUEST") {
        config.retry.retry_bad_request = parse_bool(&flag);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `PlayFabError::Config` if the file is missing, unreadable, in an
/// unsupported format, or lacks required fields.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PlayFabError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PlayFabError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PlayFabError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PlayFabError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PlayFabError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PlayFabError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["playfab.toml", "playfab.json", "config.toml", "config.json"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter().flat_map(|dir| NAMES.iter().map(move |name| dir.join(name))).find(|p| p.exists())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| PlayFabError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use playfab_domain::constants::DEFAULT_BASE_URL;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    const CREDENTIALS: [(&str, &str); 3] = [
        ("PLAYFAB_SECRET_KEY", "secret"),
        ("PLAYFAB_TITLE_ID", "ABCD"),
        ("PLAYFAB_CATALOG_VERSION", "main"),
    ];

    #[test]
    fn test_bool_parsing() {
        for raw in ["1", "true", "YES", " on "] {
            assert!(parse_bool(raw), "{raw}");
        }
        for raw in ["0", "false", "no", "off", "maybe"] {
            assert!(!parse_bool(raw), "{raw}");
        }
    }

    #[test]
    fn test_load_from_lookup_credentials_only() {
        let config = load_from_lookup(lookup_from(&CREDENTIALS)).expect("config");

        assert_eq!(config.secret_key.expose(), "secret");
        assert_eq!(config.title_id, "ABCD");
        assert_eq!(config.catalog_version, "main");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_load_from_lookup_all_vars_set() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("PLAYFAB_BASE_URL", "http://localhost:9000"),
            ("PLAYFAB_TIMEOUT_SECS", "3"),
            ("PLAYFAB_MAX_RETRIES", "5"),
            ("PLAYFAB_RETRY_BACKOFF_MS", "250"),
            ("PLAYFAB_RETRY_BAD_REQUEST", "false"),
        ]);

        let config = load_from_lookup(lookup_from(&pairs)).expect("config");

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.transport.timeout(), Duration::from_secs(3));
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.backoff(), Duration::from_millis(250));
        assert!(!config.retry.retry_bad_request);
    }

    #[test]
    fn test_missing_or_empty_credential_is_config_error() {
        let missing = load_from_lookup(lookup_from(&CREDENTIALS[..2]));
        assert!(matches!(missing, Err(PlayFabError::Config(ref msg)) if msg.contains("PLAYFAB_CATALOG_VERSION")));

        let empty = load_from_lookup(lookup_from(&[
            ("PLAYFAB_SECRET_KEY", ""),
            ("PLAYFAB_TITLE_ID", "ABCD"),
            ("PLAYFAB_CATALOG_VERSION", "main"),
        ]));
        assert!(matches!(empty, Err(PlayFabError::Config(ref msg)) if msg.contains("PLAYFAB_SECRET_KEY")));
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("PLAYFAB_MAX_RETRIES", "lots"));

        let result = load_from_lookup(lookup_from(&pairs));
        assert!(matches!(result, Err(PlayFabError::Config(ref msg)) if msg.contains("PLAYFAB_MAX_RETRIES")));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = parse_config("secret_key = 'x'", Path::new("playfab.yaml"));
        assert!(matches!(result, Err(PlayFabError::Config(ref msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_explicit_missing_file_is_config_error() {
        let result = load_from_file(Some(PathBuf::from("/definitely/not/here/playfab.toml")));
        assert!(matches!(result, Err(PlayFabError::Config(ref msg)) if msg.contains("not found")));
    }
}
