//! Description of a single remote call

use std::fmt;

/// HTTP method used for a call. The remote service only accepts these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMethod {
    Get,
    Post,
}

impl CallMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for CallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical remote invocation.
///
/// Replayed unchanged on every retry attempt, so the remote function must be
/// safe to repeat for the conditions the engine retries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: CallMethod,
    /// API group segment, e.g. `Server`.
    pub api: String,
    /// Remote function name, e.g. `GrantItemsToUser`.
    pub function: String,
    /// Serialized JSON payload.
    pub body: Vec<u8>,
}

impl Call {
    pub fn new(
        method: CallMethod,
        api: impl Into<String>,
        function: impl Into<String>,
        body: Vec<u8>,
    ) -> Self {
        Self { method, api: api.into(), function: function.into(), body }
    }

    /// Path below the base URL: `{api}/{function}`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.api, self.function)
    }
}
