//! # OneDrive Provider
//!
//! Read-only access to OneDrive and SharePoint drives through Microsoft Graph.
//!
//! ## Overview
//!
//! This module provides:
//! - App-only authentication with automatic, on-demand token refresh
//! - Serialized, authenticated GET calls against the Graph API
//! - Folder listing and item lookup by path
//! - Structured classification of Graph error responses
//!
//! Listings are requested with a page size of 999 and are not paged; larger
//! folders are truncated by the service.

pub mod client;
pub mod drive;
pub mod error;
pub mod types;

pub use client::{
    Endpoints, GraphClient, GraphClientBuilder, API_VERSION, BASE_URL, LOGIN_BASE_URL,
    MAX_PAGE_SIZE, REQUEST_TIMEOUT,
};
pub use drive::Drive;
pub use error::{ErrorDetail, GraphApiError, InnerError, OneDriveError, Result, ITEM_NOT_FOUND};
pub use types::{
    Facet, FileFacet, FileSystemInfo, FolderFacet, IdentitySet, ImageFacet, Item, ItemReference,
    User,
};
