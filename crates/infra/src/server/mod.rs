//! Server API endpoint wrappers
//!
//! Each wrapper builds a small JSON body, invokes [`PlayFabClient::call`]
//! against the `Server` API category and pulls its result out of the `data`
//! envelope. Failures from the request core pass through untouched; a success
//! response missing an expected key yields `PlayFabError::Decode`.
//!
//! [`PlayFabClient::call`]: crate::api::PlayFabClient::call

mod currency;
mod envelope;
mod inventory;
mod player;
mod title;

/// JSON object as returned inside the `data` envelope.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
