//! # Authentication Module
//!
//! App-only authentication against Azure AD for the Microsoft Graph API.
//!
//! ## Overview
//!
//! This module handles the OAuth 2.0 client-credentials grant: an application
//! id and secret registered in a tenant are exchanged for a short-lived
//! bearer token. Token caching and refresh timing belong to the caller; this
//! crate provides the token value and its staleness check.
//!
//! ## Features
//!
//! - Client-credentials token exchange over the `HttpClient` bridge
//! - Half-open validity window check (`[not_before, expires_on)`)
//! - Secret and token redaction in `Debug`/`Display` output

pub mod error;
pub mod oauth;
pub mod types;

pub use error::{AuthError, Result};
pub use oauth::{ClientCredentialsFlow, TOKEN_REQUEST_TIMEOUT};
pub use types::{Credentials, Token};
