//! UAA Integration Module
//!
//! OAuth2 client for Cloud Foundry UAA (User Account and Authentication)
//! servers.
//!
//! # Features
//!
//! - Login redirect URL building (`/oauth/authorize`)
//! - Authorization Code exchange (RFC 6749 Section 4.1)
//! - Token Refresh (RFC 6749 Section 6)
//! - Client Credentials Flow (RFC 6749 Section 4.4)
//!
//! Every token request is a single form-encoded POST to `/oauth/token`
//! authenticated with HTTP Basic client credentials. There is no retry, no
//! token storage and no refresh scheduling; callers own those concerns.
//!
//! # Example
//!
//! ```rust,ignore
//! use uaa_integration::{uaa_config, Uaa, UaaClient, UaaError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = uaa_config()
//!         .login_url("https://login.example.com")
//!         .uaa_url("https://uaa.example.com")
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .redirect_url("https://myapp.com/callback")
//!         .scope("openid")
//!         .build()?;
//!
//!     let client = UaaClient::new(config)?;
//!
//!     // Redirect the user here, then exchange the code UAA sends back.
//!     println!("Login at: {}", client.login_url());
//!     let token = client.exchange("code-from-redirect").await?;
//!
//!     match client.refresh(&token.refresh).await {
//!         Ok(token) => println!("Refreshed: {:?}", token),
//!         Err(UaaError::InvalidRefreshToken) => println!("Log in again"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration and token types
//! - `error`: error hierarchy
//! - `core`: HTTP transport
//! - `flows`: token grant implementations
//! - `builders`: fluent builder for configuration
//! - `client`: high-level client and the `Uaa` trait

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod types;

// Re-export main client
pub use client::{uaa_client, MockUaa, MockUaaCall, Uaa, UaaClient};

// Re-export builders
pub use builders::{uaa_config, UaaConfigBuilder};

// Re-export errors
pub use error::{
    ConfigurationError, Failure, NetworkError, ProtocolError, UaaError, UaaResult,
};

// Re-export types
pub use types::{GrantType, Token, UaaConfig};

// Re-export core components
pub use self::core::{
    BasicAuth, HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
};

// Re-export flows
pub use flows::{
    AuthorizationCodeFlow, AuthorizationCodeFlowImpl, ClientCredentialsFlow,
    ClientCredentialsFlowImpl, GrantRequest, RefreshTokenFlow, RefreshTokenFlowImpl,
};
