//! Core service façade and bootstrap helpers.
//!
//! This crate wires a [`DriveConfig`] and a host-provided HTTP bridge into a
//! connected [`Drive`], and exposes the [`DriveIndex`] browse orchestration
//! the front-ends are built on. Desktop hosts typically enable the
//! `desktop-shims` feature (which depends on `bridge-desktop`) and call
//! [`bootstrap`].

pub mod browse;
pub mod error;
pub mod format;

pub use browse::{parent_path, BrowseOutcome, DriveIndex, DriveSource, Listing, ListingEntry};
pub use error::{Result, ServiceError};

use std::sync::Arc;

use bridge_traits::http::HttpClient;
use core_auth::Credentials;
use core_runtime::DriveConfig;
use provider_onedrive::{Drive, GraphClient};
use tracing::info;

/// Validate `config`, acquire a token and return the configured drive.
///
/// # Errors
///
/// Fails before any network call when the configuration is incomplete, and
/// with the token exchange error when the credentials are rejected.
pub async fn connect_drive(config: &DriveConfig, http_client: Arc<dyn HttpClient>) -> Result<Drive> {
    config.validate()?;

    let credentials = Credentials::new(
        config.tenant.clone(),
        config.application.clone(),
        config.secret.clone(),
    );
    let client = Arc::new(GraphClient::connect(credentials, http_client).await?);

    info!(client = %client, drive = %config.drive, "Drive client ready");

    Ok(client.drive(config.drive.clone()))
}

/// Build a [`DriveIndex`] for `config` using the desktop HTTP bridge.
///
/// ```no_run
/// # async fn example() -> core_service::Result<()> {
/// use core_runtime::DriveConfig;
///
/// let config = DriveConfig::load("config.yaml")?;
/// let index = core_service::bootstrap(&config).await?;
/// let outcome = index.browse("/").await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub async fn bootstrap(config: &DriveConfig) -> Result<DriveIndex> {
    let http_client = bridge_desktop::ReqwestHttpClient::new()?;
    let drive = connect_drive(config, Arc::new(http_client)).await?;
    Ok(DriveIndex::new(Arc::new(drive)))
}
