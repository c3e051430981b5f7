use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use playfab_domain::{
    CallMethod, PlayFabError, TransportConfig, TransportError, TransportErrorKind,
};
use reqwest::{Client as ReqwestClient, Method};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;
use url::Url;

use crate::errors::{InfraError, IntoTransportError};

/// A fully resolved outgoing request. Each attempt owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: CallMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Status code and body of a received response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one request and returns the raw response.
///
/// Implementations must be safe to share between concurrent callers. Any
/// HTTP status counts as a response; only failures to obtain one are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with a bounded connection pool.
///
/// Idle connections are pooled by `reqwest`; the total and per-host limits
/// are enforced here with semaphore permits held for the whole exchange.
#[derive(Debug)]
pub struct HttpTransport {
    client: ReqwestClient,
    total: Arc<Semaphore>,
    per_host: DashMap<String, Arc<Semaphore>>,
    max_per_host: usize,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Build a transport from configuration.
    pub fn from_config(config: &TransportConfig) -> Result<Self, PlayFabError> {
        Self::builder()
            .max_connections(config.max_connections)
            .max_connections_per_host(config.max_connections_per_host)
            .max_idle_per_host(config.max_idle_per_host)
            .idle_timeout(config.idle_timeout())
            .timeout(config.timeout())
            .build()
    }

    async fn acquire(&self, url: &Url) -> Result<[OwnedSemaphorePermit; 2], TransportError> {
        let total = Arc::clone(&self.total).acquire_owned().await.map_err(limiter_closed)?;

        let host_limit = Arc::clone(
            self.per_host
                .entry(host_key(url))
                .or_insert_with(|| Arc::new(Semaphore::new(self.max_per_host)))
                .value(),
        );
        let host = host_limit.acquire_owned().await.map_err(limiter_closed)?;

        Ok([total, host])
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let _permits = self.acquire(&request.url).await?;

        let method = match request.method {
            CallMethod::Get => Method::GET,
            CallMethod::Post => Method::POST,
        };
        let url = request.url;
        debug!(%method, %url, "sending HTTP request");

        let mut builder = self.client.request(method.clone(), url.clone()).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(IntoTransportError::into_transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(IntoTransportError::into_transport)?.to_vec();

        debug!(%method, %url, status, bytes = body.len(), "received HTTP response");
        Ok(TransportResponse { status, body })
    }
}

fn host_key(url: &Url) -> String {
    format!("{}:{}", url.host_str().unwrap_or_default(), url.port_or_known_default().unwrap_or(0))
}

fn limiter_closed(_: tokio::sync::AcquireError) -> TransportError {
    TransportError::new(TransportErrorKind::Other, "connection limiter closed")
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    idle_timeout: Duration,
    max_connections: usize,
    max_connections_per_host: usize,
    max_idle_per_host: usize,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        let config = TransportConfig::default();
        Self {
            timeout: config.timeout(),
            idle_timeout: config.idle_timeout(),
            max_connections: config.max_connections,
            max_connections_per_host: config.max_connections_per_host,
            max_idle_per_host: config.max_idle_per_host,
        }
    }
}

impl HttpTransportBuilder {
    /// Per-call timeout covering connect, send and body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn max_connections_per_host(mut self, max: usize) -> Self {
        self.max_connections_per_host = max.max(1);
        self
    }

    pub fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    pub fn build(self) -> Result<HttpTransport, PlayFabError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .pool_idle_timeout(self.idle_timeout)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .no_proxy()
            .build()
            .map_err(|err| PlayFabError::from(InfraError::from(err)))?;

        debug!(
            max_connections = self.max_connections,
            max_connections_per_host = self.max_connections_per_host,
            timeout_ms = self.timeout.as_millis() as u64,
            "built HTTP transport"
        );

        Ok(HttpTransport {
            client,
            total: Arc::new(Semaphore::new(self.max_connections.max(1))),
            per_host: DashMap::new(),
            max_per_host: self.max_connections_per_host.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Instant;

    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request(method: CallMethod, url: &str) -> TransportRequest {
        TransportRequest {
            method,
            url: Url::parse(url).expect("url"),
            headers: vec![("X-SecretKey".into(), "secret".into())],
            body: br#"{"Keys":["a"]}"#.to_vec(),
        }
    }

    #[tokio::test]
    async fn sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Server/GetTitleData"))
            .and(header("X-SecretKey", "secret"))
            .and(body_string(r#"{"Keys":["a"]}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::builder().build().expect("transport");
        let url = format!("{}/Server/GetTitleData", server.uri());
        let response = transport.send(request(CallMethod::Post, &url)).await.expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"data":{}}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_still_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"status":"Conflict"}"#))
            .mount(&server)
            .await;

        let transport = HttpTransport::builder().build().expect("transport");
        let response =
            transport.send(request(CallMethod::Get, &server.uri())).await.expect("response");

        assert_eq!(response.status, 409);
        assert_eq!(response.body, br#"{"status":"Conflict"}"#);
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::builder().build().expect("transport");
        let err = transport
            .send(request(CallMethod::Post, &format!("http://{addr}/Server/X")))
            .await
            .unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::Connect);
    }

    #[tokio::test]
    async fn per_call_timeout_surfaces_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::builder().timeout(Duration::from_millis(50)).build().expect("transport");
        let err = transport.send(request(CallMethod::Post, &server.uri())).await.unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::Timeout);
    }

    #[tokio::test]
    async fn per_host_limit_serializes_concurrent_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(150)))
            .expect(2)
            .mount(&server)
            .await;

        let transport = Arc::new(
            HttpTransport::builder().max_connections_per_host(1).build().expect("transport"),
        );
        let started = Instant::now();
        let (first, second) = tokio::join!(
            transport.send(request(CallMethod::Post, &server.uri())),
            transport.send(request(CallMethod::Post, &server.uri())),
        );

        assert_eq!(first.expect("first").status, 200);
        assert_eq!(second.expect("second").status, 200);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn zero_limits_are_clamped_to_one() {
        let transport = HttpTransport::builder()
            .max_connections(0)
            .max_connections_per_host(0)
            .build()
            .expect("transport");

        assert_eq!(transport.total.available_permits(), 1);
        assert_eq!(transport.max_per_host, 1);
    }
}
