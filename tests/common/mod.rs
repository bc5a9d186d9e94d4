#![allow(dead_code)]

use std::time::Duration;

use earthengine_rs::{EeClient, RetryConfig};
use httpmock::MockServer;
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// The mock server's `/api` prefix, mirroring the live service layout.
pub fn api_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api", server.base_url())).unwrap()
}

pub fn client_for(server: &MockServer) -> EeClient {
    EeClient::builder()
        .api_base(api_base(server))
        .build()
        .unwrap()
}

/// A retry policy with waits short enough for tests.
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        enabled: true,
        max_retries,
        base_wait: Duration::from_millis(20),
        max_wait: Duration::from_millis(80),
    }
}
