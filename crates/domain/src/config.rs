//! Client configuration structures
//!
//! Every field except the three credentials has a default, so a minimal TOML
//! document only needs `secret_key`, `title_id` and `catalog_version`.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MAX_CONNECTIONS_PER_HOST, DEFAULT_MAX_IDLE_PER_HOST, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS, TITLE_ID_PLACEHOLDER,
};
use crate::errors::{PlayFabError, Result};

/// Title secret key. Its `Debug` output is redacted.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Top-level client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub secret_key: SecretKey,
    pub title_id: String,
    pub catalog_version: String,
    /// Base URL template; `{title_id}` is replaced with the title id.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Configuration with default transport and retry settings.
    pub fn new(
        secret_key: impl Into<SecretKey>,
        title_id: impl Into<String>,
        catalog_version: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            title_id: title_id.into(),
            catalog_version: catalog_version.into(),
            base_url: default_base_url(),
            transport: TransportConfig::default(),
            retry: RetryConfig::default(),
        }
    }

    /// Check the mandatory credentials.
    ///
    /// The title id becomes part of the request host, so it must be a single
    /// DNS label: ASCII letters, digits and `-`.
    ///
    /// # Errors
    /// Returns `PlayFabError::Config` naming the first empty setting, checked
    /// in the order secret, catalog version, title id, or for a title id that
    /// is not a valid host label.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(PlayFabError::Config("secret is required".into()));
        }
        if self.catalog_version.is_empty() {
            return Err(PlayFabError::Config("catalog version is required".into()));
        }
        if self.title_id.is_empty() {
            return Err(PlayFabError::Config("titleId is required".into()));
        }
        if !is_host_label(&self.title_id) {
            return Err(PlayFabError::Config(format!(
                "titleId must contain only ASCII letters, digits and '-': {:?}",
                self.title_id
            )));
        }
        Ok(())
    }

    /// Base URL with the title id substituted.
    pub fn resolved_base_url(&self) -> String {
        self.base_url.replace(TITLE_ID_PLACEHOLDER, &self.title_id)
    }
}

fn is_host_label(value: &str) -> bool {
    value.len() <= 63 && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Connection pool and timeout settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Upper bound on calls in flight across all hosts.
    pub max_connections: usize,
    /// Upper bound on calls in flight to a single host.
    pub max_connections_per_host: usize,
    pub max_idle_per_host: usize,
    pub idle_timeout_secs: u64,
    /// Per-call timeout, covering connect, send and body read.
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TransportConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed-delay retry policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff_ms: u64,
    /// Treat HTTP 400 as transient. Kept on for compatibility with existing
    /// deployments; a malformed request fails identically on every retry.
    pub retry_bad_request: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            retry_bad_request: true,
        }
    }
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
