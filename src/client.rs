//! UAA Client
//!
//! High-level UAA client combining URL building and the token flows.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{HttpTransport, ReqwestHttpTransport};
use crate::error::UaaError;
use crate::flows::{
    AuthorizationCodeFlow, AuthorizationCodeFlowImpl, ClientCredentialsFlow,
    ClientCredentialsFlowImpl, RefreshTokenFlow, RefreshTokenFlowImpl,
};
use crate::types::{Token, UaaConfig};

/// Operations an application needs from a UAA server.
///
/// Implemented by [`UaaClient`]; [`MockUaa`] stands in for it in tests.
#[async_trait]
pub trait Uaa: Send + Sync {
    /// Exchange an authorization code for tokens.
    async fn exchange(&self, code: &str) -> Result<Token, UaaError>;

    /// Refresh tokens.
    async fn refresh(&self, refresh_token: &str) -> Result<Token, UaaError>;

    /// Fetch a client credentials token.
    async fn get_client_token(&self) -> Result<Token, UaaError>;

    /// URL to redirect the user agent to for login.
    fn login_url(&self) -> String;
}

/// UAA client.
pub struct UaaClient<T: HttpTransport = ReqwestHttpTransport> {
    config: UaaConfig,
    transport: Arc<T>,
}

impl UaaClient<ReqwestHttpTransport> {
    /// Create a new UAA client using the reqwest transport, honouring the
    /// configured SSL verification.
    pub fn new(config: UaaConfig) -> Result<Self, UaaError> {
        let transport = Arc::new(ReqwestHttpTransport::new(config.verify_ssl)?);
        Ok(Self { config, transport })
    }
}

impl<T: HttpTransport> UaaClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: UaaConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the UAA configuration.
    pub fn config(&self) -> &UaaConfig {
        &self.config
    }

    /// URL of the `/oauth/authorize` endpoint.
    pub fn authorize_url(&self) -> String {
        self.config.authorize_url()
    }

    /// URL of the `/oauth/token` endpoint.
    pub fn token_url(&self) -> String {
        self.config.token_url()
    }
}

#[async_trait]
impl<T: HttpTransport> Uaa for UaaClient<T> {
    async fn exchange(&self, code: &str) -> Result<Token, UaaError> {
        let flow = AuthorizationCodeFlowImpl::new(self.config.clone(), self.transport.clone());
        flow.exchange(code).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Token, UaaError> {
        let flow = RefreshTokenFlowImpl::new(self.config.clone(), self.transport.clone());
        flow.refresh(refresh_token).await
    }

    async fn get_client_token(&self) -> Result<Token, UaaError> {
        let flow = ClientCredentialsFlowImpl::new(self.config.clone(), self.transport.clone());
        flow.request_token().await
    }

    fn login_url(&self) -> String {
        self.config.login_url()
    }
}

/// Create a new UAA client.
pub fn uaa_client(config: UaaConfig) -> Result<UaaClient, UaaError> {
    UaaClient::new(config)
}

/// Call recorded by [`MockUaa`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockUaaCall {
    Exchange { code: String },
    Refresh { refresh_token: String },
    GetClientToken,
}

/// Mock UAA for testing code that depends on [`Uaa`].
pub struct MockUaa {
    login_url: String,
    call_history: Mutex<Vec<MockUaaCall>>,
    next_token: Mutex<Option<Token>>,
    next_error: Mutex<Option<UaaError>>,
}

impl MockUaa {
    /// Create new mock returning `login_url` from [`Uaa::login_url`].
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            call_history: Mutex::new(Vec::new()),
            next_token: Mutex::new(None),
            next_error: Mutex::new(None),
        }
    }

    /// Set the token returned by the next call.
    pub fn set_next_token(&self, token: Token) -> &Self {
        *self.next_token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
        self
    }

    /// Set the error returned by the next call.
    pub fn set_next_error(&self, error: UaaError) -> &Self {
        *self.next_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Get call history.
    pub fn get_call_history(&self) -> Vec<MockUaaCall> {
        self.call_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, call: MockUaaCall) -> Result<Token, UaaError> {
        self.call_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        if let Some(error) = self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(error);
        }

        Ok(self
            .next_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_else(|| Token::new("mock-access-token", "mock-refresh-token")))
    }
}

#[async_trait]
impl Uaa for MockUaa {
    async fn exchange(&self, code: &str) -> Result<Token, UaaError> {
        self.respond(MockUaaCall::Exchange {
            code: code.to_string(),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Token, UaaError> {
        self.respond(MockUaaCall::Refresh {
            refresh_token: refresh_token.to_string(),
        })
    }

    async fn get_client_token(&self) -> Result<Token, UaaError> {
        self.respond(MockUaaCall::GetClientToken)
    }

    fn login_url(&self) -> String {
        self.login_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::uaa_config;
    use crate::core::MockHttpTransport;

    fn create_test_config() -> UaaConfig {
        uaa_config()
            .login_url("http://login.example.com")
            .uaa_url("http://uaa.example.com")
            .client_id("the-client-id")
            .client_secret("the-client-secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = UaaClient::new(create_test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_urls() {
        let client = uaa_client(create_test_config()).unwrap();
        assert_eq!(client.authorize_url(), "http://login.example.com/oauth/authorize");
        assert_eq!(client.token_url(), "http://uaa.example.com/oauth/token");
        assert!(client
            .login_url()
            .starts_with("http://login.example.com/oauth/authorize?"));
    }

    #[tokio::test]
    async fn test_client_flows_share_transport() {
        let transport = MockHttpTransport::new();
        let body = r#"{"access_token":"A","refresh_token":"R","token_type":"bearer"}"#;
        transport
            .queue_response(200, body)
            .queue_response(200, body)
            .queue_response(200, body);

        let client = UaaClient::with_transport(create_test_config(), transport);
        assert_eq!(client.exchange("1234").await.unwrap(), Token::new("A", "R"));
        assert_eq!(client.refresh("R").await.unwrap(), Token::new("A", "R"));
        assert_eq!(client.get_client_token().await.unwrap(), Token::new("A", "R"));
    }

    async fn sign_in(uaa: &dyn Uaa, code: &str) -> Result<String, UaaError> {
        Ok(uaa.exchange(code).await?.authorization_header())
    }

    #[tokio::test]
    async fn test_mock_uaa() {
        let uaa = MockUaa::new("http://login.example.com/oauth/authorize?state=x");
        uaa.set_next_token(Token::new("custom-token", ""));

        assert_eq!(sign_in(&uaa, "1234").await.unwrap(), "Bearer custom-token");
        assert_eq!(uaa.login_url(), "http://login.example.com/oauth/authorize?state=x");

        uaa.set_next_error(UaaError::InvalidRefreshToken);
        let error = uaa.refresh("stale").await.unwrap_err();
        assert!(error.needs_reauth());

        assert_eq!(
            uaa.get_call_history(),
            vec![
                MockUaaCall::Exchange {
                    code: "1234".to_string()
                },
                MockUaaCall::Refresh {
                    refresh_token: "stale".to_string()
                },
            ]
        );
    }
}
