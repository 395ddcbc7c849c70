//! HTTP Client Abstraction
//!
//! Provides the single async request/response seam used by the Graph client
//! and the token exchange. Implementations perform exactly one round trip per
//! call; retry and backoff are not part of this contract.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Encode `fields` as `application/x-www-form-urlencoded` and use them as
    /// the request body. `Content-Length` is set alongside the content type.
    pub fn form<T: Serialize + ?Sized>(mut self, fields: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(fields).map_err(|e| {
            BridgeError::OperationFailed(format!("Form encoding failed: {}", e))
        })?;
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self.headers
            .insert("Content-Length".to_string(), encoded.len().to_string());
        self.body = Some(Bytes::from(encoded));
        Ok(self)
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Response body as text, replacing invalid UTF-8 sequences
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// Abstracts a single HTTP round trip so that the Graph client can be driven
/// by `reqwest` on desktop and by in-memory doubles in tests.
///
/// Implementations must:
/// - honour `HttpRequest::timeout` and report expiry as [`BridgeError::Timeout`]
/// - return every HTTP status as an `Ok(HttpResponse)`; only transport
///   failures are errors
/// - never retry
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://graph.microsoft.com/v1.0/me")
///         .header("Authorization", "Bearer token");
///
///     let response = client.execute(request).await?;
///     Ok(response.text_lossy())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - Request times out
    /// - The response body cannot be read
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
