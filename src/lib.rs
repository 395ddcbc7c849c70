//! Read-only Microsoft Graph client for OneDrive and SharePoint drives.
//!
//! This crate bundles the workspace pieces a host needs to read a drive with
//! app-only credentials: [`Credentials`] and [`Token`] from `core-auth`, the
//! [`GraphClient`] and [`Drive`] from `provider-onedrive`, and the
//! [`HttpClient`] bridge they run on. With the default `desktop-shims`
//! feature the `reqwest`-backed [`ReqwestHttpClient`] is re-exported too.
//!
//! ```no_run
//! # #[cfg(feature = "desktop-shims")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use msgraph_drive::{Credentials, GraphClient, ReqwestHttpClient};
//!
//! let credentials = Credentials::new("contoso.onmicrosoft.com", "app-id", "secret");
//! let client = Arc::new(GraphClient::connect(credentials, Arc::new(ReqwestHttpClient::new()?)).await?);
//!
//! let drive = client.drive("b!drive-id");
//! for item in drive.list_children("/Music").await? {
//!     println!("{} {}", item.name, item.size);
//! }
//! # Ok(())
//! # }
//! ```

pub use bridge_traits::{BridgeError, Clock, HttpClient, HttpMethod, HttpRequest, HttpResponse, SystemClock};
pub use core_auth::{AuthError, Credentials, Token};
pub use provider_onedrive::*;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::ReqwestHttpClient;
