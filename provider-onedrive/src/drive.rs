//! Drive resource accessor

use std::sync::Arc;
use tracing::instrument;

use crate::client::GraphClient;
use crate::error::Result;
use crate::types::{Item, ItemCollection};

/// A drive reached through a shared [`GraphClient`].
///
/// Paths are relative to the drive root. Leading and trailing `/` are
/// ignored, and both `""` and `"root"` denote the root folder.
#[derive(Debug, Clone)]
pub struct Drive {
    id: String,
    client: Arc<GraphClient>,
}

impl Drive {
    pub fn new(client: Arc<GraphClient>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> &Arc<GraphClient> {
        &self.client
    }

    /// Children of the folder at `path`. Files and empty folders both yield
    /// an empty list.
    #[instrument(skip(self), fields(drive = %self.id))]
    pub async fn list_children(&self, path: &str) -> Result<Vec<Item>> {
        let collection: ItemCollection = self.client.call(&self.children_resource(path), &[]).await?;
        Ok(collection.value)
    }

    /// The file or folder at `path`.
    #[instrument(skip(self), fields(drive = %self.id))]
    pub async fn item(&self, path: &str) -> Result<Item> {
        self.client.call(&self.item_resource(path), &[]).await
    }

    fn children_resource(&self, path: &str) -> String {
        match normalize(path) {
            None => format!("/drives/{}/items/root/children", self.id),
            Some(path) => format!("/drives/{}/items/root:/{}:/children", self.id, path),
        }
    }

    fn item_resource(&self, path: &str) -> String {
        match normalize(path) {
            None => format!("/drives/{}/items/root", self.id),
            Some(path) => format!("/drives/{}/root:/{}", self.id, path),
        }
    }
}

/// Strip surrounding separators; `None` for the root folder.
fn normalize(path: &str) -> Option<&str> {
    match path.trim_matches('/') {
        "" | "root" => None,
        path => Some(path),
    }
}
