//! Storage provider abstraction.
//!
//! Durable storage is delegated to an external image CDN. This module defines
//! the contract the rest of the crate depends on ([`StorageProvider`]), the
//! ImageKit implementation, and the CDN URL resolver used for delete-by-URL.

pub mod imagekit;
pub mod resolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Result;

pub use imagekit::ImageKitProvider;
pub use resolver::{ResolvedPath, ResourcePathResolver};

/// Sort order for file listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSort {
    /// Newest first.
    DescCreated,
}

impl ListSort {
    /// Provider-side name of the sort order.
    pub fn as_str(self) -> &'static str {
        match self {
            ListSort::DescCreated => "DESC_CREATED",
        }
    }
}

/// A file to store with the provider.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File content.
    pub bytes: Vec<u8>,
    /// Name to store the file under.
    pub file_name: String,
    /// Destination folder, e.g. `/products`.
    pub folder: String,
}

/// Provider's reference to a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Opaque provider id.
    pub file_id: String,
    /// Name the provider stored the file under.
    #[serde(default)]
    pub name: String,
    /// Path within the provider's namespace.
    pub file_path: String,
    /// Public CDN URL.
    pub url: String,
}

/// Filters for a file listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilesQuery {
    /// Folder to list. `None` lists everything.
    pub path: Option<String>,
    /// Sort order.
    pub sort: Option<ListSort>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Provider search expression, e.g. `name="photo"`.
    pub search_query: Option<String>,
}

/// One entry of a provider listing.
///
/// Only the fields this crate reads are typed; everything else the provider
/// returned is kept in `extra` and serialized back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Opaque provider id.
    pub file_id: String,
    /// File name.
    pub name: String,
    /// Path within the provider's namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Public CDN URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Remaining provider fields.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// External image storage service.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store a file.
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile>;

    /// List files matching the query.
    async fn list_files(&self, query: ListFilesQuery) -> Result<Vec<StoredFile>>;

    /// Delete a file by its provider id, returning the provider's response.
    async fn delete_file(&self, file_id: &str) -> Result<serde_json::Value>;
}
