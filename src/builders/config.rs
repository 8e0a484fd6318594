//! Configuration Builder
//!
//! Fluent builder for UAA configuration.

use secrecy::SecretString;
use url::Url;

use crate::error::{ConfigurationError, UaaError};
use crate::types::UaaConfig;

/// UAA configuration builder.
#[derive(Default)]
pub struct UaaConfigBuilder {
    login_url: Option<String>,
    uaa_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    redirect_url: Option<String>,
    scope: Option<String>,
    state: Option<String>,
    access_type: Option<String>,
    approval_prompt: Option<String>,
    verify_ssl: Option<bool>,
}

impl UaaConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the login server base URL.
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    /// Set the UAA server base URL.
    pub fn uaa_url(mut self, url: impl Into<String>) -> Self {
        self.uaa_url = Some(url.into());
        self
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set redirect URL.
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Set scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set access type.
    pub fn access_type(mut self, access_type: impl Into<String>) -> Self {
        self.access_type = Some(access_type.into());
        self
    }

    /// Set approval prompt.
    pub fn approval_prompt(mut self, approval_prompt: impl Into<String>) -> Self {
        self.approval_prompt = Some(approval_prompt.into());
        self
    }

    /// Enable or disable SSL verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Values already set on the builder are overwritten by variables that are present.
    pub fn from_env(mut self) -> Self {
        if let Ok(url) = std::env::var("UAA_LOGIN_URL") {
            self.login_url = Some(url);
        }
        if let Ok(url) = std::env::var("UAA_URL") {
            self.uaa_url = Some(url);
        }
        if let Ok(client_id) = std::env::var("UAA_CLIENT_ID") {
            self.client_id = Some(client_id);
        }
        if let Ok(secret) = std::env::var("UAA_CLIENT_SECRET") {
            self.client_secret = Some(SecretString::new(secret));
        }
        if let Ok(url) = std::env::var("UAA_REDIRECT_URL") {
            self.redirect_url = Some(url);
        }
        if let Ok(scope) = std::env::var("UAA_SCOPE") {
            self.scope = Some(scope);
        }
        if let Ok(state) = std::env::var("UAA_STATE") {
            self.state = Some(state);
        }
        if let Ok(access_type) = std::env::var("UAA_ACCESS_TYPE") {
            self.access_type = Some(access_type);
        }
        if let Ok(approval_prompt) = std::env::var("UAA_APPROVAL_PROMPT") {
            self.approval_prompt = Some(approval_prompt);
        }
        if let Ok(val) = std::env::var("UAA_VERIFY_SSL") {
            self.verify_ssl = Some(val.to_lowercase() != "false");
        }
        self
    }

    /// Build the UAA configuration.
    pub fn build(self) -> Result<UaaConfig, UaaError> {
        let login_url = validate_endpoint(required(self.login_url, "login_url")?)?;
        let uaa_url = validate_endpoint(required(self.uaa_url, "uaa_url")?)?;
        let client_id = required(self.client_id, "client_id")?;

        Ok(UaaConfig {
            login_url,
            uaa_url,
            client_id,
            client_secret: self
                .client_secret
                .unwrap_or_else(|| SecretString::new(String::new())),
            redirect_url: self.redirect_url.unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            access_type: self.access_type.unwrap_or_default(),
            approval_prompt: self.approval_prompt.unwrap_or_default(),
            verify_ssl: self.verify_ssl.unwrap_or(true),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, UaaError> {
    value.ok_or_else(|| {
        UaaError::Configuration(ConfigurationError::MissingField {
            field: field.to_string(),
        })
    })
}

fn validate_endpoint(url: String) -> Result<String, UaaError> {
    match Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url),
        _ => Err(UaaError::Configuration(ConfigurationError::InvalidEndpoint {
            url,
        })),
    }
}

/// Create a new UAA configuration builder.
pub fn uaa_config() -> UaaConfigBuilder {
    UaaConfigBuilder::new()
}
