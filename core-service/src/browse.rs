//! Browse orchestration shared by the HTTP front-ends.
//!
//! A browse request lists the folder at the requested path. A non-empty
//! listing is rendered as a directory page; an empty one is treated as a
//! file (or an empty folder) and resolved to its download URL.

use async_trait::async_trait;
use bridge_traits::time::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use provider_onedrive::{Drive, Item};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{Result, ServiceError};
use crate::format::{readable_date, readable_size};

/// The two drive operations browsing relies on.
#[async_trait]
pub trait DriveSource: Send + Sync {
    async fn list_children(&self, path: &str) -> provider_onedrive::Result<Vec<Item>>;

    async fn item(&self, path: &str) -> provider_onedrive::Result<Item>;
}

#[async_trait]
impl DriveSource for Drive {
    async fn list_children(&self, path: &str) -> provider_onedrive::Result<Vec<Item>> {
        Drive::list_children(self, path).await
    }

    async fn item(&self, path: &str) -> provider_onedrive::Result<Item> {
        Drive::item(self, path).await
    }
}

/// One row of a directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub readable_size: String,
    pub modified: DateTime<Utc>,
    pub readable_date: String,
    pub is_folder: bool,
}

/// A directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Path of the enclosing folder, always starting with `/`
    pub parent: String,
    /// Requested path as received
    pub current: String,
    pub entries: Vec<ListingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    Listing(Listing),
    /// Download URL of the file at the requested path
    Redirect(String),
}

/// Browses one drive on behalf of a front-end.
#[derive(Clone)]
pub struct DriveIndex {
    source: Arc<dyn DriveSource>,
    clock: Arc<dyn Clock>,
}

impl DriveIndex {
    pub fn new(source: Arc<dyn DriveSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// Use `clock` for relative dates.
    pub fn with_clock(source: Arc<dyn DriveSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    #[instrument(skip(self))]
    pub async fn browse(&self, path: &str) -> Result<BrowseOutcome> {
        let children = self.source.list_children(path).await?;

        if children.is_empty() {
            let item = self.source.item(path).await?;
            return match item.download_url {
                Some(url) if !url.is_empty() => {
                    debug!("Redirecting to download URL");
                    Ok(BrowseOutcome::Redirect(url))
                }
                _ => Err(ServiceError::NotDownloadable(path.to_string())),
            };
        }

        let now = self.clock.now();
        let entries = children
            .into_iter()
            .map(|item| ListingEntry {
                readable_size: readable_size(item.size),
                readable_date: readable_date(item.last_modified_date_time, now),
                modified: item.last_modified_date_time,
                is_folder: item.is_folder(),
                name: item.name,
            })
            .collect::<Vec<_>>();

        debug!(entries = entries.len(), "Listed folder");

        Ok(BrowseOutcome::Listing(Listing {
            parent: parent_path(path),
            current: path.to_string(),
            entries,
        }))
    }
}

/// Enclosing folder of `path`, e.g. `/a/b/` becomes `/a` and `a` becomes `/`.
pub fn parent_path(path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let parent = match trimmed.rfind('/') {
        Some(index) => trimmed[..index].trim_end_matches('/'),
        None => "",
    };

    let parent = parent.trim_start_matches('/');
    if parent.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parent)
    }
}
