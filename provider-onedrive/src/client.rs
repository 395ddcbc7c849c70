//! Authenticated Microsoft Graph client
//!
//! [`GraphClient`] owns the application credentials and the current access
//! token. Every outbound request, including token refreshes, runs while
//! holding the client's token lock, so at most one request per client is in
//! flight and a stale token is refreshed exactly once no matter how many
//! callers noticed it.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::time::{Clock, SystemClock};
use core_auth::{ClientCredentialsFlow, Credentials, Token};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use url::Url;

use crate::drive::Drive;
use crate::error::{GraphApiError, OneDriveError, Result};

/// Base URL used to acquire tokens
pub const LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Base URL of every Graph API call
pub const BASE_URL: &str = "https://graph.microsoft.com";

/// Graph API version used by this client
pub const API_VERSION: &str = "v1.0";

/// Page size requested on every call. Larger collections are truncated by
/// the service; paging is not implemented.
pub const MAX_PAGE_SIZE: u32 = 999;

/// Deadline for a single round trip
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Service endpoints the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_base: String,
    pub api_base: String,
    pub api_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_base: LOGIN_BASE_URL.to_string(),
            api_base: BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }
}

/// Builder for [`GraphClient`] with endpoint and clock overrides.
pub struct GraphClientBuilder {
    credentials: Credentials,
    http_client: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    endpoints: Endpoints,
}

impl GraphClientBuilder {
    pub fn login_base(mut self, url: impl Into<String>) -> Self {
        self.endpoints.login_base = url.into();
        self
    }

    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.endpoints.api_base = url.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.endpoints.api_version = version.into();
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the credentials and acquire the first token.
    ///
    /// # Errors
    ///
    /// Fails without any network traffic when a credential field is empty,
    /// and with the exchange error when no token can be obtained.
    #[instrument(skip(self), fields(tenant = %self.credentials.tenant_id))]
    pub async fn connect(self) -> Result<GraphClient> {
        self.credentials.validate()?;

        let flow = ClientCredentialsFlow::new(
            Arc::clone(&self.http_client),
            self.endpoints.login_base.clone(),
            self.endpoints.api_base.clone(),
        )
        .with_timeout(REQUEST_TIMEOUT);

        let token = flow.request_token(&self.credentials).await?;

        info!(
            application = %self.credentials.application_id,
            "Connected to Microsoft Graph"
        );

        Ok(GraphClient {
            credentials: self.credentials,
            http_client: self.http_client,
            clock: self.clock,
            flow,
            endpoints: self.endpoints,
            token: Mutex::new(token),
        })
    }
}

/// Microsoft Graph API connection.
///
/// # Example
///
/// ```ignore
/// use core_auth::Credentials;
/// use provider_onedrive::GraphClient;
/// use std::sync::Arc;
///
/// let credentials = Credentials::new(tenant, application, secret);
/// let client = Arc::new(GraphClient::connect(credentials, http_client).await?);
/// let items = client.drive(drive_id).list_children("/Music").await?;
/// ```
pub struct GraphClient {
    credentials: Credentials,
    http_client: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    flow: ClientCredentialsFlow,
    endpoints: Endpoints,
    token: Mutex<Token>,
}

impl GraphClient {
    /// Start building a client against the public Microsoft endpoints.
    pub fn builder(credentials: Credentials, http_client: Arc<dyn HttpClient>) -> GraphClientBuilder {
        GraphClientBuilder {
            credentials,
            http_client,
            clock: Arc::new(SystemClock),
            endpoints: Endpoints::default(),
        }
    }

    /// Connect with default endpoints and the system clock.
    pub async fn connect(
        credentials: Credentials,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self> {
        Self::builder(credentials, http_client).connect().await
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Accessor for the drive with the given id.
    pub fn drive(self: &Arc<Self>, id: impl Into<String>) -> Drive {
        Drive::new(Arc::clone(self), id)
    }

    /// Perform an authenticated GET of `resource` and decode the JSON reply.
    ///
    /// `resource` is appended to `{api_base}/{api_version}` and must start
    /// with `/`. `$top` is always added to `params`.
    ///
    /// # Errors
    ///
    /// - [`OneDriveError::Auth`] if a stale token cannot be refreshed
    /// - [`OneDriveError::Transport`] on network failure or timeout
    /// - [`OneDriveError::Api`] for any non-2xx status
    /// - [`OneDriveError::Decode`] if the body does not match `T`
    #[instrument(skip(self, params), fields(resource = %resource))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut token = self.token.lock().await;

        if token.wants_refresh(self.clock.now()) {
            debug!("Access token is stale, refreshing");
            *token = self.flow.request_token(&self.credentials).await?;
        }

        let request = HttpRequest::new(HttpMethod::Get, self.resource_url(resource, params)?)
            .header("Content-Type", "application/json")
            .header("Authorization", token.authorization_header_value())
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let error = GraphApiError::classify(response.status, &response.body);
            debug!(status = response.status, error = %error, "Graph API call failed");
            return Err(error.into());
        }

        Ok(response.json()?)
    }

    fn resource_url(&self, resource: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut url = Url::parse(&self.endpoints.api_base).map_err(|e| OneDriveError::InvalidUrl {
            url: self.endpoints.api_base.clone(),
            reason: e.to_string(),
        })?;

        // `set_path` keeps existing escapes, so a literal `%` must be escaped first.
        let path = format!("/{}{}", self.endpoints.api_version, resource).replace('%', "%25");
        url.set_path(&path);

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("$top", &MAX_PAGE_SIZE.to_string());
        }

        Ok(url.to_string())
    }

    fn token_window(&self) -> Option<(String, String)> {
        self.token
            .try_lock()
            .ok()
            .map(|token| (token.not_before.to_rfc3339(), token.expires_on.to_rfc3339()))
    }
}

impl fmt::Display for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (not_before, expires_on) = self
            .token_window()
            .unwrap_or_else(|| ("busy".to_string(), "busy".to_string()));

        write!(
            f,
            "GraphClient({}, Token validity: [{} - {}])",
            self.credentials, not_before, expires_on
        )
    }
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("credentials", &self.credentials)
            .field("endpoints", &self.endpoints)
            .field("token_window", &self.token_window())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    const TOKEN_BODY: &str = r#"{
        "token_type": "Bearer",
        "access_token": "abc",
        "not_before": "1000",
        "expires_on": "5000"
    }"#;

    fn respond(status: u16, body: &str) -> BridgeResult<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        })
    }

    fn credentials() -> Credentials {
        Credentials::new("tenant", "app", "super-secret")
    }

    fn expect_token(mock_http: &mut MockHttpClient) {
        mock_http
            .expect_execute()
            .times(1)
            .withf(|request| request.url.ends_with("/oauth2/token"))
            .returning(|_| respond(200, TOKEN_BODY));
    }

    fn is_graph_call(request: &HttpRequest) -> bool {
        request.url.starts_with(BASE_URL)
    }

    async fn connect(mock_http: MockHttpClient) -> GraphClient {
        GraphClient::builder(credentials(), Arc::new(mock_http))
            .clock(Arc::new(FixedClock(Utc.timestamp_opt(2000, 0).unwrap())))
            .connect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_credentials_without_network() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(0);

        let result = GraphClient::connect(Credentials::new("tenant", "", "secret"), Arc::new(mock_http)).await;

        assert!(matches!(
            result,
            Err(OneDriveError::Auth(core_auth::AuthError::InvalidCredentials(_)))
        ));
    }

    #[tokio::test]
    async fn test_connect_fails_when_exchange_fails() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| respond(400, r#"{"error":"invalid_request"}"#));

        let result = GraphClient::connect(credentials(), Arc::new(mock_http)).await;
        assert!(matches!(result, Err(OneDriveError::Auth(_))));
    }

    #[tokio::test]
    async fn test_call_builds_authenticated_request() {
        let mut mock_http = MockHttpClient::new();
        expect_token(&mut mock_http);
        mock_http
            .expect_execute()
            .times(1)
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url
                        == "https://graph.microsoft.com/v1.0/me/drive?select=id&%24top=999"
                    && request.headers.get("Authorization").map(String::as_str) == Some("Bearer abc")
                    && request.headers.get("Content-Type").map(String::as_str)
                        == Some("application/json")
                    && request.timeout == Some(REQUEST_TIMEOUT)
            })
            .returning(|_| respond(200, r#"{"id": "drive-1"}"#));

        let client = connect(mock_http).await;
        let value: serde_json::Value = client.call("/me/drive", &[("select", "id")]).await.unwrap();

        assert_eq!(value["id"], "drive-1");
    }

    #[tokio::test]
    async fn test_call_maps_error_status() {
        let mut mock_http = MockHttpClient::new();
        expect_token(&mut mock_http);
        mock_http
            .expect_execute()
            .times(1)
            .withf(is_graph_call)
            .returning(|_| respond(503, "upstream unavailable"));

        let client = connect(mock_http).await;
        let error = client
            .call::<serde_json::Value>("/drives/x", &[])
            .await
            .unwrap_err();

        let api_error = error.api_error().unwrap();
        assert!(api_error.is_raw());
        assert_eq!(api_error.status_code(), 503);
        assert_eq!(api_error.raw_body(), "upstream unavailable");
    }

    #[tokio::test]
    async fn test_call_surfaces_decode_error() {
        let mut mock_http = MockHttpClient::new();
        expect_token(&mut mock_http);
        mock_http
            .expect_execute()
            .times(1)
            .withf(is_graph_call)
            .returning(|_| respond(200, "{not json"));

        let client = connect(mock_http).await;
        let error = client
            .call::<serde_json::Value>("/drives/x", &[])
            .await
            .unwrap_err();

        assert!(matches!(error, OneDriveError::Decode(_)));
    }

    #[tokio::test]
    async fn test_display_redacts_secret() {
        let mut mock_http = MockHttpClient::new();
        expect_token(&mut mock_http);

        let client = connect(mock_http).await;
        let rendered = client.to_string();

        assert!(rendered.contains("TenantID: tenant"));
        assert!(rendered.contains("sup...ret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("1970-01-01T00:16:40+00:00"));
        assert!(!format!("{:?}", client).contains("super-secret"));
    }

    #[tokio::test]
    async fn test_display_while_call_in_flight() {
        let mut mock_http = MockHttpClient::new();
        expect_token(&mut mock_http);

        let client = connect(mock_http).await;
        let _guard = client.token.lock().await;

        let rendered = client.to_string();
        assert!(rendered.ends_with("Token validity: [busy - busy])"));
        assert!(!rendered.contains("refreshing"));
    }
}
