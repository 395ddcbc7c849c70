//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop and server hosts
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` with rustls
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! let client = GraphClient::connect(credentials, http_client).await?;
//! ```

mod http;

pub use http::ReqwestHttpClient;
