//! Token Types
//!
//! Tokens returned by the UAA token endpoint.

use serde::{Deserialize, Deserializer};

/// Access and refresh token pair.
///
/// Decoded from the token endpoint's JSON body. Missing or `null` fields are
/// left empty and unknown fields, `token_type` included, are ignored.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Token {
    /// Access token.
    #[serde(rename = "access_token", default, deserialize_with = "null_as_empty")]
    pub access: String,
    /// Refresh token.
    #[serde(rename = "refresh_token", default, deserialize_with = "null_as_empty")]
    pub refresh: String,
}

impl Token {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Check if a refresh token was issued.
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh.is_empty()
    }

    /// Format as Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}
