//! Protocol constants and configuration defaults
//!
//! Centralized location for the values the remote service dictates and the
//! defaults the client falls back to when configuration omits them.

// Wire protocol
pub const DEFAULT_BASE_URL: &str = "https://{title_id}.playfabapi.com";
pub const TITLE_ID_PLACEHOLDER: &str = "{title_id}";
pub const SECRET_KEY_HEADER: &str = "X-SecretKey";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const SUCCESS_STATUS: u16 = 200;

/// API category for server-authoritative calls.
pub const SERVER_API: &str = "Server";

// Error envelope
pub const ERROR_STATUS_FIELD: &str = "status";
pub const CONFLICT_STATUS: &str = "Conflict";

// Transport defaults
pub const DEFAULT_MAX_CONNECTIONS: usize = 100;
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 100;
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 100;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Retry defaults
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;
