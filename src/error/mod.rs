//! UAA Error Types
//!
//! Closed error hierarchy for UAA token requests.

use thiserror::Error;

/// Root error type for UAA integration.
#[derive(Error, Debug)]
pub enum UaaError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The UAA rejected the refresh token with `401 Unauthorized`.
    #[error("UAA Invalid Refresh Token")]
    InvalidRefreshToken,

    #[error(transparent)]
    Failure(#[from] Failure),
}

impl UaaError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "UAA_CONFIG",
            Self::Network(_) => "UAA_NETWORK",
            Self::Protocol(_) => "UAA_PROTOCOL",
            Self::InvalidRefreshToken => "UAA_INVALID_REFRESH_TOKEN",
            Self::Failure(_) => "UAA_FAILURE",
        }
    }

    /// HTTP status code associated with the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(NetworkError::BodyRead { status, .. }) => Some(*status),
            Self::InvalidRefreshToken => Some(401),
            Self::Failure(failure) => Some(failure.status()),
            _ => None,
        }
    }

    /// Check if error requires the user to go through the login flow again.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::InvalidRefreshToken)
    }
}

/// Server-side failure: any response status above 399.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("UAA Failure: {status} {body}")]
pub struct Failure {
    status: u16,
    body: String,
}

impl Failure {
    /// Create a failure from a status code and the raw response body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code returned by the server.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("TLS error: {message}")]
    TlsError { message: String },

    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to read response body (status {status}): {message}")]
    BodyRead { status: u16, message: String },
}

/// Protocol/response parsing error.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// Result type for UAA operations.
pub type UaaResult<T> = Result<T, UaaError>;
