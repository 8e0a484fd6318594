//! Token Grant Request
//!
//! Shared request building, response classification and decoding for every
//! grant sent to the UAA token endpoint.

use tracing::debug;
use url::form_urlencoded;

use crate::core::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::error::{Failure, ProtocolError, UaaError};
use crate::types::{GrantType, Token, UaaConfig};

/// Form parameters for one token grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantRequest {
    grant_type: GrantType,
    params: Vec<(&'static str, String)>,
}

impl GrantRequest {
    /// Start a request for the given grant type.
    pub fn new(grant_type: GrantType) -> Self {
        Self {
            grant_type,
            params: Vec::new(),
        }
    }

    /// Append a form parameter. Empty values are still sent.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn grant_type(&self) -> GrantType {
        self.grant_type
    }

    /// Encode as an `application/x-www-form-urlencoded` body, `grant_type` first.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("grant_type", self.grant_type.as_str());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// POST a grant to the token endpoint and map the response to a token.
pub(crate) async fn request_token<T>(
    config: &UaaConfig,
    transport: &T,
    grant: GrantRequest,
) -> Result<Token, UaaError>
where
    T: HttpTransport + ?Sized,
{
    let url = config.token_url();
    debug!(grant_type = %grant.grant_type(), url = %url, "Sending UAA token request");

    let http_request = HttpRequest {
        method: HttpMethod::Post,
        url,
        credentials: Some(config.basic_auth()),
        body: Some(grant.encode()),
    };

    let response = transport.send(http_request).await?;
    debug!(
        grant_type = %grant.grant_type(),
        status = response.status,
        "Received UAA token response"
    );

    classify_response(grant.grant_type(), response)
}

/// Classify a token endpoint response.
///
/// A 401 answering a refresh grant means the refresh token is no longer
/// valid; any other status above 399 is a [`Failure`].
pub fn classify_response(grant_type: GrantType, response: HttpResponse) -> Result<Token, UaaError> {
    if grant_type == GrantType::RefreshToken && response.status == 401 {
        return Err(UaaError::InvalidRefreshToken);
    }

    if response.status > 399 {
        return Err(UaaError::Failure(Failure::new(response.status, response.body)));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        UaaError::Protocol(ProtocolError::InvalidJson {
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockHttpTransport;

    const TOKEN_BODY: &str =
        r#"{"access_token":"A","refresh_token":"R","token_type":"bearer"}"#;

    #[test]
    fn test_encode_puts_grant_type_first() {
        let grant = GrantRequest::new(GrantType::AuthorizationCode)
            .param("redirect_uri", "http://redirect.example.com")
            .param("scope", "username,email")
            .param("code", "1234");

        assert_eq!(
            grant.encode(),
            "grant_type=authorization_code&redirect_uri=http%3A%2F%2Fredirect.example.com&scope=username%2Cemail&code=1234"
        );
    }

    #[test]
    fn test_encode_keeps_empty_values() {
        let grant = GrantRequest::new(GrantType::ClientCredentials).param("redirect_uri", "");
        assert_eq!(grant.encode(), "grant_type=client_credentials&redirect_uri=");
    }

    #[test]
    fn test_classify_success() {
        let token = classify_response(
            GrantType::AuthorizationCode,
            HttpResponse::new(200, TOKEN_BODY),
        )
        .unwrap();
        assert_eq!(token, Token::new("A", "R"));
    }

    #[test]
    fn test_classify_client_token_with_null_refresh() {
        let token = classify_response(
            GrantType::ClientCredentials,
            HttpResponse::new(
                200,
                r#"{"access_token":"A","refresh_token":null,"token_type":"bearer"}"#,
            ),
        )
        .unwrap();
        assert_eq!(token, Token::new("A", ""));
    }

    #[test]
    fn test_classify_refresh_unauthorized() {
        let result = classify_response(
            GrantType::RefreshToken,
            HttpResponse::new(401, r#"{"error":"invalid_token"}"#),
        );
        assert!(matches!(result, Err(UaaError::InvalidRefreshToken)));
    }

    #[test]
    fn test_classify_unauthorized_for_other_grants_is_failure() {
        let result = classify_response(
            GrantType::ClientCredentials,
            HttpResponse::new(401, r#"{"errors":"X"}"#),
        );
        match result {
            Err(UaaError::Failure(failure)) => {
                assert_eq!(failure.status(), 401);
                assert_eq!(failure.body(), r#"{"errors":"X"}"#);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_status_boundary() {
        // 399 is not a failure; its body is decoded.
        let result = classify_response(GrantType::AuthorizationCode, HttpResponse::new(399, "{}"));
        assert_eq!(result.unwrap(), Token::default());

        let result = classify_response(GrantType::AuthorizationCode, HttpResponse::new(400, "bad"));
        assert_eq!(result.unwrap_err().to_string(), "UAA Failure: 400 bad");
    }

    #[test]
    fn test_classify_malformed_success_body() {
        let result = classify_response(GrantType::ClientCredentials, HttpResponse::new(200, "<html>"));
        assert!(matches!(
            result,
            Err(UaaError::Protocol(ProtocolError::InvalidJson { .. }))
        ));
    }

    #[tokio::test]
    async fn test_request_token_sends_form_post() {
        let config = UaaConfig::new(
            "http://login.example.com",
            "http://uaa.example.com",
            "the-client-id",
            "the-client-secret",
        );
        let transport = MockHttpTransport::new();
        transport.queue_response(200, TOKEN_BODY);

        let grant = GrantRequest::new(GrantType::ClientCredentials).param("redirect_uri", "");
        let token = request_token(&config, &transport, grant).await.unwrap();
        assert_eq!(token.access, "A");

        let request = transport.get_last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://uaa.example.com/oauth/token");
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=client_credentials&redirect_uri=")
        );
        let credentials = request.credentials.unwrap();
        assert_eq!(credentials.username, "the-client-id");
        assert_eq!(
            credentials.header_value(),
            "Basic dGhlLWNsaWVudC1pZDp0aGUtY2xpZW50LXNlY3JldA=="
        );
    }

    #[tokio::test]
    async fn test_request_token_propagates_transport_error() {
        let config = UaaConfig::new("http://login.example.com", "http://uaa.example.com", "id", "secret");
        let transport = MockHttpTransport::new();

        let grant = GrantRequest::new(GrantType::RefreshToken).param("refresh_token", "r");
        let result = request_token(&config, &transport, grant).await;
        assert!(matches!(result, Err(UaaError::Network(_))));
    }
}
