//! Configuration loading
//!
//! Builds a [`playfab_domain::ClientConfig`] from environment variables or a
//! TOML/JSON file.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, load_from_lookup, probe_config_paths};
