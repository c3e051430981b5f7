//! Conversions from external infrastructure errors into domain errors.

use playfab_domain::{PlayFabError, TransportError, TransportErrorKind};
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PlayFabError);

impl From<InfraError> for PlayFabError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PlayFabError> for InfraError {
    fn from(value: PlayFabError) -> Self {
        InfraError(value)
    }
}

/// Maps a client library failure onto the transport failure kinds the
/// request engine retries on.
pub trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        let message = self.to_string();

        if self.is_timeout() {
            return TransportError::new(TransportErrorKind::Timeout, message);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TransportError::new(TransportErrorKind::Connect, message);
        }

        if self.is_body() || self.is_decode() {
            return TransportError::new(TransportErrorKind::Body, message);
        }

        if self.is_request() || self.is_builder() {
            return TransportError::new(TransportErrorKind::Request, message);
        }

        TransportError::new(TransportErrorKind::Other, message)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(PlayFabError::Transport(value.into_transport()))
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → PlayFabError */
/* -------------------------------------------------------------------------- */

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(PlayFabError::Config(format!("invalid base URL: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
