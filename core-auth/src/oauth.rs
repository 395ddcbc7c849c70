//! OAuth 2.0 Client Credentials Grant
//!
//! Exchanges an Azure AD application's credentials for an app-only bearer
//! token (RFC 6749 §4.4) against the v1 token endpoint.
//!
//! # Example
//!
//! ```no_run
//! use core_auth::{ClientCredentialsFlow, Credentials};
//! use std::sync::Arc;
//!
//! # async fn example() -> core_auth::Result<()> {
//! # use bridge_traits::http::HttpClient;
//! # let http_client: Arc<dyn HttpClient> = todo!();
//! let flow = ClientCredentialsFlow::new(
//!     http_client,
//!     "https://login.microsoftonline.com",
//!     "https://graph.microsoft.com",
//! );
//!
//! let credentials = Credentials::new("tenant-id", "application-id", "secret");
//! let token = flow.request_token(&credentials).await?;
//! println!("Token valid until {}", token.expires_on);
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::{Credentials, Token};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Deadline applied to every token request.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client-credentials token exchange.
///
/// The flow is stateless: it does not cache tokens. Callers own the current
/// token and decide when to ask for a new one.
pub struct ClientCredentialsFlow {
    http_client: Arc<dyn HttpClient>,
    login_base: String,
    resource: String,
    timeout: Duration,
}

impl ClientCredentialsFlow {
    /// Create a flow against `login_base` requesting tokens for `resource`.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        login_base: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            login_base: login_base.into(),
            resource: resource.into(),
            timeout: TOKEN_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resource the issued tokens are scoped to.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Token endpoint of `tenant`: `{login_base}/{tenant}/oauth2/token`.
    pub fn token_url(&self, tenant: &str) -> Result<String> {
        let mut url = Url::parse(&self.login_base).map_err(|e| AuthError::InvalidEndpoint {
            url: self.login_base.clone(),
            reason: e.to_string(),
        })?;
        url.set_path(&format!("/{}/oauth2/token", tenant));
        Ok(url.to_string())
    }

    /// Request a fresh token for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any credential field is empty
    /// - The request fails in transit or times out
    /// - The endpoint answers with a non-2xx status
    /// - The response is not a valid token
    #[instrument(
        skip(self, credentials),
        fields(tenant = %credentials.tenant_id, application = %credentials.application_id)
    )]
    pub async fn request_token(&self, credentials: &Credentials) -> Result<Token> {
        credentials.validate()?;

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.application_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("resource", self.resource.as_str()),
        ];

        let request = HttpRequest::new(HttpMethod::Post, self.token_url(&credentials.tenant_id)?)
            .form(&form[..])?
            .timeout(self.timeout);

        debug!("Requesting client credentials token");

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let status = response.status;
            let body = response.text_lossy();

            warn!(status, error = %body, "Token endpoint rejected the request");

            return Err(AuthError::TokenRequestFailed { status, body });
        }

        let token: Token = response.json()?;

        if token.not_before > token.expires_on {
            return Err(AuthError::InvertedValidity {
                not_before: token.not_before,
                expires_on: token.expires_on,
            });
        }

        info!(expires_on = %token.expires_on, "Acquired access token");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("my-tenant", "my-app", "my-secret")
    }

    fn flow(http_client: MockHttpClient) -> ClientCredentialsFlow {
        ClientCredentialsFlow::new(
            Arc::new(http_client),
            "https://login.example.com",
            "https://graph.example.com",
        )
    }

    fn respond(status: u16, body: &'static str) -> BridgeResult<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        })
    }

    #[test]
    fn test_token_url() {
        let flow = flow(MockHttpClient::new());
        assert_eq!(
            flow.token_url("my-tenant").unwrap(),
            "https://login.example.com/my-tenant/oauth2/token"
        );
    }

    #[test]
    fn test_token_url_invalid_base() {
        let flow = ClientCredentialsFlow::new(
            Arc::new(MockHttpClient::new()),
            "not a valid url",
            "https://graph.example.com",
        );
        assert!(matches!(
            flow.token_url("t"),
            Err(AuthError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn test_request_token_sends_form() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .withf(|request| {
                let body = request
                    .body
                    .as_ref()
                    .map(|b| String::from_utf8_lossy(b).into_owned())
                    .unwrap_or_default();

                request.method == HttpMethod::Post
                    && request.url == "https://login.example.com/my-tenant/oauth2/token"
                    && request.timeout == Some(TOKEN_REQUEST_TIMEOUT)
                    && body.contains("grant_type=client_credentials")
                    && body.contains("client_id=my-app")
                    && body.contains("client_secret=my-secret")
                    && body.contains("resource=https%3A%2F%2Fgraph.example.com")
            })
            .returning(|_| {
                respond(
                    200,
                    r#"{
                        "token_type": "Bearer",
                        "access_token": "fresh",
                        "not_before": "100",
                        "expires_on": "3700"
                    }"#,
                )
            });

        let token = flow(mock_http).request_token(&credentials()).await.unwrap();
        assert_eq!(token.authorization_header_value(), "Bearer fresh");
        assert_eq!(token.expires_on.timestamp(), 3700);
    }

    #[tokio::test]
    async fn test_request_token_rejected() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| respond(401, r#"{"error":"invalid_client"}"#));

        let error = flow(mock_http)
            .request_token(&credentials())
            .await
            .unwrap_err();

        match error {
            AuthError::TokenRequestFailed { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_token_transport_failure() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|request| {
            Err(BridgeError::Timeout {
                url: request.url.clone(),
            })
        });

        let error = flow(mock_http)
            .request_token(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::NetworkError(BridgeError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_request_token_bad_json() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| respond(200, "<html>"));

        let error = flow(mock_http)
            .request_token(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::InvalidTokenResponse(_)));
    }

    #[tokio::test]
    async fn test_request_token_inverted_window() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            respond(
                200,
                r#"{"token_type":"Bearer","access_token":"x","not_before":"50","expires_on":"10"}"#,
            )
        });

        let error = flow(mock_http)
            .request_token(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::InvertedValidity { .. }));
    }

    #[tokio::test]
    async fn test_empty_credentials_fail_before_network() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(0);

        let error = flow(mock_http)
            .request_token(&Credentials::new("", "a", "s"))
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::InvalidCredentials(_)));
    }
}
