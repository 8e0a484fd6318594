//! HTTP Transport
//!
//! HTTP client interface and implementations for UAA requests.

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Mutex, PoisonError};
use tracing::trace;

use crate::error::{NetworkError, UaaError};

/// Content type sent with every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP request definition.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Full request URL.
    pub url: String,
    /// Basic authentication credentials.
    pub credentials: Option<BasicAuth>,
    /// Form-encoded request body.
    pub body: Option<String>,
}

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// HTTP Basic authentication credentials.
#[derive(Clone, Debug)]
pub struct BasicAuth {
    /// User name (the client ID for UAA token requests).
    pub username: String,
    password: SecretString,
}

impl BasicAuth {
    /// Create credentials from a user name and password.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Format as `Authorization` header value.
    pub fn header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {}", encoded)
    }
}

/// HTTP response definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, UaaError>;
}

/// Default reqwest-based HTTP transport.
#[derive(Debug)]
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
    verify_ssl: bool,
}

impl ReqwestHttpTransport {
    /// Create a transport. With `verify_ssl` off, certificate and hostname
    /// validation are skipped; only use that against development servers.
    ///
    /// Redirects are followed with reqwest's default policy (up to 10 hops).
    pub fn new(verify_ssl: bool) -> Result<Self, UaaError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| {
                UaaError::Network(NetworkError::TlsError {
                    message: e.to_string(),
                })
            })?;

        Ok(Self { client, verify_ssl })
    }

    /// Whether server certificates are validated.
    pub fn verifies_ssl(&self) -> bool {
        self.verify_ssl
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, UaaError> {
        trace!(method = request.method.as_str(), url = %request.url, "Sending HTTP request");

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        if let Some(credentials) = &request.credentials {
            req_builder = req_builder.header(AUTHORIZATION, credentials.header_value());
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| map_send_error(&request.url, e))?;

        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            UaaError::Network(NetworkError::BodyRead {
                status,
                message: e.to_string(),
            })
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn map_send_error(url: &str, error: reqwest::Error) -> UaaError {
    let network_error = if error.is_timeout() {
        NetworkError::Timeout
    } else if error.is_builder() {
        NetworkError::InvalidUrl {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else if is_tls_failure(&error) {
        NetworkError::TlsError {
            message: error_chain(&error),
        }
    } else {
        NetworkError::ConnectionFailed {
            message: error_chain(&error),
        }
    };

    UaaError::Network(network_error)
}

// reqwest does not classify TLS failures, so look at the source chain.
fn is_tls_failure(error: &reqwest::Error) -> bool {
    let chain = error_chain(error).to_lowercase();
    chain.contains("certificate") || chain.contains("tls") || chain.contains("handshake")
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, NetworkError>>>,
    request_history: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return. Responses are returned in queue order.
    pub fn queue_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport failure.
    pub fn queue_error(&self, error: NetworkError) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
        self
    }

    /// Get request history.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.request_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get last request.
    pub fn get_last_request(&self) -> Option<HttpRequest> {
        self.request_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, UaaError> {
        self.request_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(error)) => Err(UaaError::Network(error)),
            None => Err(UaaError::Network(NetworkError::ConnectionFailed {
                message: "No mock response available".to_string(),
            })),
        }
    }
}
