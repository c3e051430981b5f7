//! # PlayFab Infrastructure
//!
//! Request execution for a PlayFab title, from pooled HTTP up to the typed
//! `Server` API wrappers.
//!
//! This crate contains:
//! - HTTP transport with bounded connection pooling
//! - Failure classification and the retrying request engine
//! - The [`PlayFabClient`] shell and its endpoint wrappers
//! - Configuration loading from the environment or files
//! - Pluggable log sinks
//!
//! ## Architecture
//! - Implements the contracts defined in `playfab-domain`
//! - Contains all I/O (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod server;

// Re-export commonly used items
pub use api::{ErrorClassifier, FailureClass, PlayFabClient, PlayFabClientBuilder, RequestEngine};
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder, Transport, TransportRequest, TransportResponse};
pub use observability::{LogLevel, Logger, MemoryLogger, NoopLogger, TracingLogger};
pub use server::JsonMap;
