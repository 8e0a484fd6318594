//! Authorization Code Flow
//!
//! Login redirect URL and exchange of the returned code for tokens.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::HttpTransport;
use crate::error::UaaError;
use crate::flows::grant::{request_token, GrantRequest};
use crate::types::{GrantType, Token, UaaConfig};

/// Authorization Code Flow interface.
#[async_trait]
pub trait AuthorizationCodeFlow: Send + Sync {
    /// Build the URL the user agent is redirected to for login.
    fn login_url(&self) -> String;

    /// Exchange the code UAA hands back on redirect for tokens.
    async fn exchange(&self, code: &str) -> Result<Token, UaaError>;
}

/// Authorization Code Flow implementation.
pub struct AuthorizationCodeFlowImpl<T: HttpTransport> {
    config: UaaConfig,
    transport: Arc<T>,
}

impl<T: HttpTransport> AuthorizationCodeFlowImpl<T> {
    /// Create new Authorization Code Flow.
    pub fn new(config: UaaConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }

    fn build_grant(&self, code: &str) -> GrantRequest {
        GrantRequest::new(GrantType::AuthorizationCode)
            .param("redirect_uri", self.config.redirect_url.as_str())
            .param("scope", self.config.scope.as_str())
            .param("code", code)
    }
}

#[async_trait]
impl<T: HttpTransport> AuthorizationCodeFlow for AuthorizationCodeFlowImpl<T> {
    fn login_url(&self) -> String {
        self.config.login_url()
    }

    async fn exchange(&self, code: &str) -> Result<Token, UaaError> {
        let grant = self.build_grant(code);
        request_token(&self.config, self.transport.as_ref(), grant).await
    }
}
