//! Microsoft Graph driveItem resource types
//!
//! See: https://learn.microsoft.com/graph/api/resources/driveitem

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity stub found in `createdBy` / `lastModifiedBy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySet {
    #[serde(default)]
    pub user: User,
}

/// Location of an item's parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    #[serde(default)]
    pub drive_id: String,
    #[serde(default)]
    pub drive_type: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path: String,
}

/// Timestamps as reported by the client that wrote the item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemInfo {
    #[serde(default)]
    pub created_date_time: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    #[serde(default)]
    pub child_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFacet {
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
}

/// Typed view over the optional facets of an [`Item`].
///
/// Graph sends `folder`, `file` and `image` as independent optional
/// objects. This view picks one of them in that order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<'a> {
    Folder(&'a FolderFacet),
    File(&'a FileFacet),
    Image(&'a ImageFacet),
    None,
}

/// A file or folder in a drive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub web_url: String,

    /// Size in bytes; for folders the total size of their content
    #[serde(default)]
    pub size: i64,

    #[serde(default)]
    pub created_date_time: DateTime<Utc>,

    #[serde(default)]
    pub last_modified_date_time: DateTime<Utc>,

    #[serde(default)]
    pub created_by: IdentitySet,

    #[serde(default)]
    pub last_modified_by: IdentitySet,

    #[serde(default)]
    pub parent_reference: ItemReference,

    #[serde(default)]
    pub file_system_info: FileSystemInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderFacet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileFacet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFacet>,

    /// Short-lived pre-authenticated URL, only present on files
    #[serde(
        default,
        rename = "@microsoft.graph.downloadUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
}

impl Item {
    /// An item is a folder when it carries the folder facet.
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    pub fn facet(&self) -> Facet<'_> {
        if let Some(folder) = &self.folder {
            Facet::Folder(folder)
        } else if let Some(file) = &self.file {
            Facet::File(file)
        } else if let Some(image) = &self.image {
            Facet::Image(image)
        } else {
            Facet::None
        }
    }
}

/// Envelope of collection responses such as `/children`.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemCollection {
    #[serde(default)]
    pub value: Vec<Item>,
}
