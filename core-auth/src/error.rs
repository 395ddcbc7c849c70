use bridge_traits::error::BridgeError;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid login endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Token endpoint returned {status}: {body}")]
    TokenRequestFailed { status: u16, body: String },

    #[error("Token request failed: {0}")]
    NetworkError(#[from] BridgeError),

    #[error("Failed to parse token response: {0}")]
    InvalidTokenResponse(#[from] serde_json::Error),

    #[error("Token validity window is inverted: not before {not_before}, expires on {expires_on}")]
    InvertedValidity {
        not_before: DateTime<Utc>,
        expires_on: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, AuthError>;
