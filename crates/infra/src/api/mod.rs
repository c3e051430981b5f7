//! Request execution core for the PlayFab API
//!
//! # Architecture
//!
//! - `client`: process-facing handle holding credentials and configuration
//! - `engine`: attempt/wait/done state machine with a fixed retry budget
//! - `classify`: buckets rejected calls into conflict, transient, fatal and
//!   unparseable failures
//!
//! Data flows one way: endpoint wrapper → `PlayFabClient::call` →
//! `RequestEngine` → `Transport`. Only rejected responses pass through the
//! classifier on the way back.

pub mod classify;
pub mod client;
pub mod engine;

pub use classify::{ErrorClassifier, FailureClass, UnparseableReason};
pub use client::{PlayFabClient, PlayFabClientBuilder};
pub use engine::RequestEngine;
