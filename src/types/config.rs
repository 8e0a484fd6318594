//! Configuration Types
//!
//! UAA client configuration and the URLs derived from it.

use secrecy::SecretString;
use url::form_urlencoded;

use crate::core::BasicAuth;

/// Path of the authorization endpoint on the login server.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Path of the token endpoint on the UAA server.
pub const TOKEN_PATH: &str = "/oauth/token";

/// UAA client configuration.
#[derive(Clone)]
pub struct UaaConfig {
    /// Base URL of the login server (serves `/oauth/authorize`).
    pub login_url: String,
    /// Base URL of the UAA server (serves `/oauth/token`).
    pub uaa_url: String,
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: SecretString,
    /// Redirect URI registered for the client.
    pub redirect_url: String,
    /// Requested scope.
    pub scope: String,
    /// Opaque state echoed back by the login redirect.
    pub state: String,
    /// `access_type` authorize parameter.
    pub access_type: String,
    /// `approval_prompt` authorize parameter.
    pub approval_prompt: String,
    /// Validate server certificates.
    pub verify_ssl: bool,
}

impl UaaConfig {
    /// Create a configuration with endpoints and client credentials; the
    /// remaining fields start empty and SSL verification is on.
    pub fn new(
        login_url: impl Into<String>,
        uaa_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            login_url: login_url.into(),
            uaa_url: uaa_url.into(),
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            redirect_url: String::new(),
            scope: String::new(),
            state: String::new(),
            access_type: String::new(),
            approval_prompt: String::new(),
            verify_ssl: true,
        }
    }

    /// URL of the `/oauth/authorize` endpoint, without query string.
    pub fn authorize_url(&self) -> String {
        format!("{}{}", trim_base_url(&self.login_url), AUTHORIZE_PATH)
    }

    /// URL the user agent is redirected to in order to log in.
    ///
    /// Every parameter is included even when empty, in alphabetical key order.
    /// Values are `application/x-www-form-urlencoded`: space becomes `+`,
    /// `*` `-` `.` `_` stay literal and everything else, `~` included, is
    /// percent-encoded.
    pub fn login_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("access_type", &self.access_type)
            .append_pair("approval_prompt", &self.approval_prompt)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scope)
            .append_pair("state", &self.state)
            .finish();

        format!("{}?{}", self.authorize_url(), query)
    }

    /// URL of the `/oauth/token` endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{}", trim_base_url(&self.uaa_url), TOKEN_PATH)
    }

    /// Basic auth credentials for the token endpoint.
    pub fn basic_auth(&self) -> BasicAuth {
        BasicAuth::new(self.client_id.clone(), self.client_secret.clone())
    }
}

impl std::fmt::Debug for UaaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UaaConfig")
            .field("login_url", &self.login_url)
            .field("uaa_url", &self.uaa_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .field("scope", &self.scope)
            .field("state", &self.state)
            .field("access_type", &self.access_type)
            .field("approval_prompt", &self.approval_prompt)
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

// Base URLs may end in `/`; it is dropped whenever a path is appended.
fn trim_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Grant type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
    ClientCredentials,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
            Self::ClientCredentials => "client_credentials",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
