use std::net::TcpListener;
use std::sync::Arc;

use playfab_domain::ClientConfig;
use playfab_infra::{MemoryLogger, PlayFabClient};
use wiremock::MockServer;

pub const SECRET: &str = "test-secret";
pub const TITLE_ID: &str = "ABCD";
pub const CATALOG: &str = "main";

/// Client aimed at `base_url` with zero backoff and a capturing logger.
pub fn client_for(base_url: &str) -> (PlayFabClient, Arc<MemoryLogger>) {
    client_with_config(base_url, |_| {})
}

/// Like [`client_for`], but lets the caller tweak configuration first.
pub fn client_with_config(
    base_url: &str,
    tweak: impl FnOnce(&mut ClientConfig),
) -> (PlayFabClient, Arc<MemoryLogger>) {
    let mut config = ClientConfig::new(SECRET, TITLE_ID, CATALOG);
    config.base_url = base_url.to_string();
    config.retry.backoff_ms = 0;
    config.transport.timeout_secs = 5;
    tweak(&mut config);

    let logger = Arc::new(MemoryLogger::new());
    let client = PlayFabClient::builder(config)
        .logger(logger.clone())
        .build()
        .expect("client should build");
    (client, logger)
}

/// Client pointed at a running mock server.
pub fn client_for_server(server: &MockServer) -> (PlayFabClient, Arc<MemoryLogger>) {
    client_for(&server.uri())
}

/// Base URL of a local port with nothing listening.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
