//! # Host Bridge Traits
//!
//! Platform abstraction traits shared by the drive client and its hosts.
//!
//! ## Overview
//!
//! This crate defines the contract between the Graph drive client and the
//! host-specific plumbing it depends on. Keeping these behind traits lets the
//! client run against `reqwest` in production and against in-memory doubles
//! in tests.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - One async HTTP round trip, no retries
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Include the request URL in transport failures
//! - Report deadline expiry as `BridgeError::Timeout`
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so a single implementation
//! can be shared behind an `Arc` by every task of the server.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use time::{Clock, SystemClock};
