//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Per-request deadlines taken from `HttpRequest::timeout`
///
/// Every call is a single round trip. Failed requests are reported to the
/// caller unchanged.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("msgraph-drive/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BridgeError::OperationFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    fn classify_error(url: &str, error: reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            BridgeError::ConnectionFailed {
                url: url.to_string(),
                reason: error.to_string(),
            }
        } else {
            BridgeError::OperationFailed(format!("HTTP request to {} failed: {}", url, error))
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        debug!(method = ?request.method, url = %url, "Executing HTTP request");

        let response = self.build_request(request).send().await.map_err(|e| {
            warn!(error = %e, url = %url, "HTTP request failed");
            Self::classify_error(&url, e)
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        // The deadline also covers reading the body.
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify_error(&url, e))?;

        debug!(status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
