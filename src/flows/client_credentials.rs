//! Client Credentials Flow
//!
//! Token for the client itself, with no end user involved.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::HttpTransport;
use crate::error::UaaError;
use crate::flows::grant::{request_token, GrantRequest};
use crate::types::{GrantType, Token, UaaConfig};

/// Client Credentials Flow interface.
#[async_trait]
pub trait ClientCredentialsFlow: Send + Sync {
    /// Request a token using the client's own credentials.
    async fn request_token(&self) -> Result<Token, UaaError>;
}

/// Client Credentials Flow implementation.
pub struct ClientCredentialsFlowImpl<T: HttpTransport> {
    config: UaaConfig,
    transport: Arc<T>,
}

impl<T: HttpTransport> ClientCredentialsFlowImpl<T> {
    /// Create new Client Credentials Flow.
    pub fn new(config: UaaConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl<T: HttpTransport> ClientCredentialsFlow for ClientCredentialsFlowImpl<T> {
    async fn request_token(&self) -> Result<Token, UaaError> {
        let grant = GrantRequest::new(GrantType::ClientCredentials)
            .param("redirect_uri", self.config.redirect_url.as_str());

        request_token(&self.config, self.transport.as_ref(), grant).await
    }
}
