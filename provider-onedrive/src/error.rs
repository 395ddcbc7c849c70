use bridge_traits::error::BridgeError;
use core_auth::AuthError;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Machine code Graph returns for missing paths.
pub const ITEM_NOT_FOUND: &str = "itemNotFound";

/// Server-side diagnostics attached to a Graph error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InnerError {
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "request-id")]
    pub request_id: String,
    #[serde(default, rename = "client-request-id")]
    pub client_request_id: String,
}

/// Decoded `error` object of a Graph error response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "innerError")]
    pub inner_error: InnerError,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

/// Non-2xx response from Graph.
///
/// Built by [`GraphApiError::classify`]. When the body is not the usual
/// `{"error": {...}}` envelope the error is *raw*: only the status and the
/// unparsed body are available and [`code`](Self::code) returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphApiError {
    status: u16,
    detail: Option<ErrorDetail>,
    raw_body: String,
}

impl GraphApiError {
    /// Classify a failed response from its status and body.
    pub fn classify(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);

        Self {
            status,
            detail,
            raw_body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Whether the body failed to decode as an error envelope.
    pub fn is_raw(&self) -> bool {
        self.detail.is_none()
    }

    pub fn code(&self) -> Option<&str> {
        self.detail.as_ref().map(|detail| detail.code.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.detail.as_ref().map(|detail| detail.message.as_str())
    }

    pub fn inner_error(&self) -> Option<&InnerError> {
        self.detail.as_ref().map(|detail| &detail.inner_error)
    }

    /// Response body exactly as received.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn is_item_not_found(&self) -> bool {
        self.code() == Some(ITEM_NOT_FOUND)
    }
}

impl fmt::Display for GraphApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "StatusCode is not OK: {}({}).", self.status, detail.code),
            None => write!(
                f,
                "StatusCode is not OK: {}. Body: {}",
                self.status, self.raw_body
            ),
        }
    }
}

impl std::error::Error for GraphApiError {}

#[derive(Error, Debug)]
pub enum OneDriveError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] GraphApiError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] BridgeError),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl OneDriveError {
    /// The Graph error behind this failure, if any.
    pub fn api_error(&self) -> Option<&GraphApiError> {
        match self {
            OneDriveError::Api(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_item_not_found(&self) -> bool {
        self.api_error()
            .is_some_and(GraphApiError::is_item_not_found)
    }
}

pub type Result<T> = std::result::Result<T, OneDriveError>;
