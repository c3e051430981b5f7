//! Process-facing PlayFab client
//!
//! Holds the title credentials and the request engine. Every endpoint wrapper
//! funnels through [`PlayFabClient::call`], which resolves the endpoint URL,
//! attaches the secret key and hands the request to the engine.

use std::sync::Arc;

use playfab_domain::constants::{CONTENT_TYPE_JSON, SECRET_KEY_HEADER};
use playfab_domain::{Call, CallMethod, ClientConfig, PlayFabError, Result, SecretKey};
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::engine::RequestEngine;
use crate::errors::InfraError;
use crate::http::{HttpTransport, Transport, TransportRequest};
use crate::observability::{Logger, NoopLogger};

/// Client for a single PlayFab title.
///
/// Cheap to share behind an `Arc`; concurrent calls only contend on the
/// transport's connection pool.
pub struct PlayFabClient {
    secret_key: SecretKey,
    title_id: String,
    catalog_version: String,
    base_url: Url,
    engine: RequestEngine,
    logger: Arc<dyn Logger>,
}

impl PlayFabClient {
    /// Create a client with default transport and retry settings and no
    /// logging.
    ///
    /// # Errors
    ///
    /// Returns `PlayFabError::Config` if any credential is empty.
    pub fn new(
        secret_key: impl Into<SecretKey>,
        title_id: impl Into<String>,
        catalog_version: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(ClientConfig::new(secret_key, title_id, catalog_version)).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder(config: ClientConfig) -> PlayFabClientBuilder {
        PlayFabClientBuilder { config, logger: None, transport: None }
    }

    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    pub fn catalog_version(&self) -> &str {
        &self.catalog_version
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// URL for `{api}/{function}` below the configured base.
    pub fn endpoint(&self, api: &str, function: &str) -> Url {
        let mut url = self.base_url.clone();
        // Bases that cannot carry a path are rejected at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(api).push(function);
        }
        url
    }

    /// Invoke a remote function with a pre-serialized JSON body.
    ///
    /// Returns the success body unparsed.
    ///
    /// # Errors
    ///
    /// See [`RequestEngine::execute`].
    pub async fn call(
        &self,
        method: CallMethod,
        api: &str,
        function: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        self.execute(Call::new(method, api, function, body)).await
    }

    /// Serialize `body` as JSON and invoke a remote function.
    ///
    /// # Errors
    ///
    /// Returns `PlayFabError::Serialization` if `body` cannot be encoded,
    /// otherwise see [`RequestEngine::execute`].
    pub async fn call_json<T: Serialize + ?Sized>(
        &self,
        method: CallMethod,
        api: &str,
        function: &str,
        body: &T,
    ) -> Result<Vec<u8>> {
        let encoded = serde_json::to_vec(body)
            .map_err(|e| PlayFabError::Serialization(format!("{function}: {e}")))?;
        self.call(method, api, function, encoded).await
    }

    /// Execute a prepared [`Call`].
    #[instrument(skip(self, call), fields(function = %call.function, method = %call.method))]
    pub async fn execute(&self, call: Call) -> Result<Vec<u8>> {
        let request = TransportRequest {
            method: call.method,
            url: self.endpoint(&call.api, &call.function),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                (SECRET_KEY_HEADER.to_string(), self.secret_key.expose().to_string()),
            ],
            body: call.body,
        };

        self.engine.execute(&call.function, request).await
    }
}

impl std::fmt::Debug for PlayFabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayFabClient")
            .field("secret_key", &self.secret_key)
            .field("title_id", &self.title_id)
            .field("catalog_version", &self.catalog_version)
            .field("base_url", &self.base_url.as_str())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PlayFabClient`].
pub struct PlayFabClientBuilder {
    config: ClientConfig,
    logger: Option<Arc<dyn Logger>>,
    transport: Option<Arc<dyn Transport>>,
}

impl PlayFabClientBuilder {
    /// Log sink for engine and endpoint output. Defaults to [`NoopLogger`].
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replace the pooled HTTP transport built from configuration.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate configuration and assemble the client.
    ///
    /// No network activity happens here.
    ///
    /// # Errors
    ///
    /// Returns `PlayFabError::Config` for empty credentials or an unusable base
    /// URL, or when the HTTP transport cannot be built.
    pub fn build(self) -> Result<PlayFabClient> {
        let config = self.config;
        config.validate()?;

        let base_url = Url::parse(&config.resolved_base_url())
            .map_err(|err| PlayFabError::from(InfraError::from(err)))?;
        if base_url.cannot_be_a_base() {
            return Err(PlayFabError::Config(format!("invalid base URL: {base_url}")));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_config(&config.transport)?),
        };
        let logger: Arc<dyn Logger> = self.logger.unwrap_or_else(|| Arc::new(NoopLogger));
        let engine = RequestEngine::new(transport, &config.retry, Arc::clone(&logger));

        debug!(title_id = %config.title_id, base_url = %base_url, "built PlayFab client");

        Ok(PlayFabClient {
            secret_key: config.secret_key,
            title_id: config.title_id,
            catalog_version: config.catalog_version,
            base_url,
            engine,
            logger,
        })
    }
}
