//! Classification of rejected calls
//!
//! Decides, from a non-success response, whether the remote service reported
//! a condition that is safe to retry.

use playfab_domain::constants::{CONFLICT_STATUS, ERROR_STATUS_FIELD};
use playfab_domain::{PlayFabError, RetryConfig, ServiceError};
use serde_json::{Map, Value};
use thiserror::Error;

/// HTTP statuses treated as transient regardless of the error envelope.
const TRANSIENT_STATUSES: [u16; 2] = [502, 503];
const BAD_REQUEST: u16 = 400;

/// Summary fragments checked when no HTTP status was preserved. Kept only to
/// match the wording older error summaries used.
const TRANSIENT_PHRASES: [&str; 2] = ["Service Unavailable", "Bad Gateway"];
const BAD_REQUEST_PHRASE: &str = "Bad Request";

/// Retry category of a rejected call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureClass {
    /// The remote operation did not apply because of a concurrent change.
    Conflict,
    /// Overload or gateway failure believed to be temporary.
    Transient,
    /// The body is not an error envelope; the failure mode is unknown.
    Unparseable(UnparseableReason),
    /// Rejected for a reason retrying cannot fix.
    Fatal,
}

impl FailureClass {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict | Self::Transient)
    }
}

/// Why an error body could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnparseableReason {
    #[error("{0}")]
    InvalidJson(String),

    #[error("missing status field")]
    MissingStatus,
}

impl UnparseableReason {
    /// Terminal error carrying the reason and the original body.
    pub fn into_error(self, source: ServiceError) -> PlayFabError {
        PlayFabError::Unparseable {
            function: source.function,
            status: source.status,
            reason: self.to_string(),
            body: source.body,
        }
    }
}

/// Buckets rejected calls into [`FailureClass`]es.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassifier {
    retry_bad_request: bool,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl ErrorClassifier {
    pub fn new(retry_bad_request: bool) -> Self {
        Self { retry_bad_request }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.retry_bad_request)
    }

    /// Classify a rejected call.
    ///
    /// The body must be a JSON object with a string `status` field; anything
    /// else is [`FailureClass::Unparseable`]. A `Conflict` status wins over the
    /// transient checks.
    pub fn classify(&self, error: &ServiceError) -> FailureClass {
        let envelope: Map<String, Value> = match serde_json::from_slice(&error.body) {
            Ok(envelope) => envelope,
            Err(err) => {
                return FailureClass::Unparseable(UnparseableReason::InvalidJson(err.to_string()))
            }
        };

        let Some(status) = envelope.get(ERROR_STATUS_FIELD).and_then(Value::as_str) else {
            return FailureClass::Unparseable(UnparseableReason::MissingStatus);
        };

        if status == CONFLICT_STATUS {
            return FailureClass::Conflict;
        }

        if self.is_transient(error) {
            return FailureClass::Transient;
        }

        FailureClass::Fatal
    }

    fn is_transient(&self, error: &ServiceError) -> bool {
        match error.status {
            Some(code) => {
                TRANSIENT_STATUSES.contains(&code) || (self.retry_bad_request && code == BAD_REQUEST)
            }
            None => {
                TRANSIENT_PHRASES.iter().any(|phrase| error.message.contains(phrase))
                    || (self.retry_bad_request && error.message.contains(BAD_REQUEST_PHRASE))
            }
        }
    }
}
