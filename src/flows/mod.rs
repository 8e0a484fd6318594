//! UAA Flows
//!
//! Token endpoint grant implementations.
//!
//! - **Authorization Code Flow**: login redirect and code exchange
//! - **Refresh Token Flow**: new token pair from a refresh token
//! - **Client Credentials Flow**: token for the client itself
//!
//! All three share [`GrantRequest`] for the wire format and response handling.

pub mod authorization_code;
pub mod client_credentials;
pub mod grant;
pub mod refresh;

pub use authorization_code::{AuthorizationCodeFlow, AuthorizationCodeFlowImpl};
pub use client_credentials::{ClientCredentialsFlow, ClientCredentialsFlowImpl};
pub use grant::{classify_response, GrantRequest};
pub use refresh::{RefreshTokenFlow, RefreshTokenFlowImpl};
