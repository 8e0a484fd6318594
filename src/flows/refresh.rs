//! Refresh Token Flow
//!
//! Trade a refresh token for a new token pair.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::HttpTransport;
use crate::error::UaaError;
use crate::flows::grant::{request_token, GrantRequest};
use crate::types::{GrantType, Token, UaaConfig};

/// Refresh Token Flow interface.
#[async_trait]
pub trait RefreshTokenFlow: Send + Sync {
    /// Refresh tokens. A refresh token rejected with 401 yields
    /// [`UaaError::InvalidRefreshToken`].
    async fn refresh(&self, refresh_token: &str) -> Result<Token, UaaError>;
}

/// Refresh Token Flow implementation.
pub struct RefreshTokenFlowImpl<T: HttpTransport> {
    config: UaaConfig,
    transport: Arc<T>,
}

impl<T: HttpTransport> RefreshTokenFlowImpl<T> {
    /// Create new Refresh Token Flow.
    pub fn new(config: UaaConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl<T: HttpTransport> RefreshTokenFlow for RefreshTokenFlowImpl<T> {
    async fn refresh(&self, refresh_token: &str) -> Result<Token, UaaError> {
        let grant = GrantRequest::new(GrantType::RefreshToken)
            .param("redirect_uri", self.config.redirect_url.as_str())
            .param("refresh_token", refresh_token);

        request_token(&self.config, self.transport.as_ref(), grant).await
    }
}
