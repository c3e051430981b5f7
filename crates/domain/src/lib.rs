//! # PlayFab Domain
//!
//! Data model shared by every layer of the PlayFab client.
//!
//! This crate contains:
//! - The error taxonomy (`PlayFabError`, `ServiceError`, `TransportError`)
//! - Client, transport and retry configuration structures
//! - The description of a single remote call
//! - Protocol constants and defaults
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; everything here is plain data

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
