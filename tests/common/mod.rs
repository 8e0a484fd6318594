//! Shared helpers for integration tests against a WireMock UAA.

#![allow(dead_code)]

use serde_json::json;
use tracing_subscriber::EnvFilter;
use uaa_integration::UaaConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "the-client-id";
pub const CLIENT_SECRET: &str = "the-client-secret";

/// Install a test-writer subscriber once; `RUST_LOG=uaa_integration=debug`
/// shows the request logging.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a mock UAA server.
pub async fn setup_mock_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Configuration pointing the token endpoint at the mock server.
pub fn config_for(server: &MockServer) -> UaaConfig {
    UaaConfig::new("http://login.example.com", server.uri(), CLIENT_ID, CLIENT_SECRET)
}

/// POST /oauth/token matcher.
pub fn token_endpoint() -> wiremock::MockBuilder {
    Mock::given(method("POST")).and(path("/oauth/token"))
}

/// Successful token response.
pub fn token_response(access_token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": access_token,
        "refresh_token": "refresh-token",
        "token_type": "bearer"
    }))
}

/// Response with a raw body.
pub fn raw_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}
