//! Success envelope extraction

use playfab_domain::{PlayFabError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::JsonMap;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// The `data` object of a success body. A leading UTF-8 BOM is ignored.
pub(super) fn data(function: &str, body: &[u8]) -> Result<JsonMap> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let mut envelope: JsonMap =
        serde_json::from_slice(body).map_err(|e| decode(function, e.to_string()))?;

    match envelope.remove("data") {
        Some(Value::Object(data)) => Ok(data),
        _ => Err(decode(function, "missing data object")),
    }
}

/// Remove and deserialize a required key.
pub(super) fn field<T: DeserializeOwned>(function: &str, data: &mut JsonMap, key: &str) -> Result<T> {
    let value = data.remove(key).ok_or_else(|| decode(function, format!("missing {key}")))?;
    serde_json::from_value(value).map_err(|e| decode(function, format!("{key}: {e}")))
}

/// Like [`field`], but an absent key yields the default.
pub(super) fn optional_field<T: DeserializeOwned + Default>(
    function: &str,
    data: &mut JsonMap,
    key: &str,
) -> Result<T> {
    match data.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| decode(function, format!("{key}: {e}"))),
    }
}

fn decode(function: &str, message: impl Into<String>) -> PlayFabError {
    PlayFabError::Decode { function: function.to_string(), message: message.into() }
}
