//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

/// Main error type for the PlayFab client
#[derive(Error, Debug)]
pub enum PlayFabError {
    /// A mandatory setting is missing or malformed. Never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No HTTP response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The remote service rejected the call.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The remote service rejected the call with a body that is not a
    /// recognizable error envelope.
    #[error("{function} - unparseable error response ({reason}) originalError: {}", String::from_utf8_lossy(.body))]
    Unparseable { function: String, status: Option<u16>, reason: String, body: Vec<u8> },

    /// The request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A successful response did not carry the expected data.
    #[error("Failed to parse {function} result: {message}")]
    Decode { function: String, message: String },
}

impl PlayFabError {
    /// HTTP status attached to the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service(err) => err.status,
            Self::Unparseable { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body attached to the failure, if any.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Service(err) => Some(&err.body),
            Self::Unparseable { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for PlayFab operations
pub type Result<T> = std::result::Result<T, PlayFabError>;

/// Non-success HTTP response from the remote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{function} - {message}")]
pub struct ServiceError {
    /// Remote function that failed.
    pub function: String,
    /// HTTP status code. `None` only when the status was not preserved.
    pub status: Option<u16>,
    /// Response body exactly as received.
    pub body: Vec<u8>,
    /// Human-readable summary.
    pub message: String,
}

impl ServiceError {
    /// Build the error for a response with the given status and body.
    pub fn from_response(function: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        let message = format!(
            "Failed to process request with status code {status}: {}",
            String::from_utf8_lossy(&body)
        );
        Self { function: function.into(), status: Some(status), body, message }
    }
}

/// Categories of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The per-call timeout elapsed
    Timeout,
    /// DNS resolution or TCP/TLS connect failed
    Connect,
    /// The request could not be built or sent
    Request,
    /// The response body could not be read
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Failure below HTTP: the call never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}
