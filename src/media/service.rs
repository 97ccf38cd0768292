//! Media service for mediagate.
//!
//! High-level image operations on top of a [`StorageProvider`]:
//! - Upload into the folder selected by a category tag
//! - Listing, optionally filtered to one category
//! - Deletion by provider id or by public CDN URL

use std::sync::Arc;

use chrono::Utc;

use super::category::{Category, DEFAULT_TAG};
use crate::provider::{
    ListFilesQuery, ListSort, ResourcePathResolver, StorageProvider, StoredFile, UploadFile,
};
use crate::{Error, Result};

/// Default number of files returned by a listing.
pub const DEFAULT_LIST_LIMIT: u32 = 30;

/// Largest page the provider accepts.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Filename used when the client does not send one.
const DEFAULT_FILENAME: &str = "upload";

/// Request data for an image upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File content.
    pub content: Vec<u8>,
    /// Original filename.
    pub filename: String,
    /// Category tag as sent by the caller.
    pub tag: String,
}

impl UploadRequest {
    /// Create a new upload request. Empty filename and tag fall back to defaults.
    pub fn new(content: Vec<u8>, filename: Option<String>, tag: Option<String>) -> Self {
        Self {
            content,
            filename: filename
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            tag: tag
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_TAG.to_string()),
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Public CDN URL.
    pub url: String,
    /// Provider file id.
    pub file_id: String,
    /// Path within the provider.
    pub file_path: String,
    /// Folder the file was stored in.
    pub folder: &'static str,
    /// Category tag as sent by the caller.
    pub tag: String,
}

/// Result of a listing.
#[derive(Debug, Clone)]
pub struct ListOutcome {
    /// Files returned by the provider.
    pub files: Vec<StoredFile>,
    /// Folder listed, or `None` for everything.
    pub folder: Option<&'static str>,
}

/// Build the stored name `{tag}_{millis}_{filename}`.
pub fn storage_name(tag: &str, timestamp_millis: i64, filename: &str) -> String {
    format!("{tag}_{timestamp_millis}_{filename}")
}

/// Normalize a caller-supplied listing limit.
///
/// Missing, non-numeric and non-positive values give [`DEFAULT_LIST_LIMIT`];
/// large values are capped at [`MAX_LIST_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> u32 {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n > 0 => n.min(MAX_LIST_LIMIT as i64) as u32,
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Image operations against the configured provider.
#[derive(Clone)]
pub struct MediaService {
    provider: Arc<dyn StorageProvider>,
    resolver: ResourcePathResolver,
}

impl MediaService {
    /// Create a new media service.
    pub fn new(provider: Arc<dyn StorageProvider>, resolver: ResourcePathResolver) -> Self {
        Self { provider, resolver }
    }

    /// Upload an image. `None` content means no file was attached.
    pub async fn upload(&self, request: Option<UploadRequest>) -> Result<UploadOutcome> {
        let request = request
            .filter(|r| !r.content.is_empty())
            .ok_or(Error::MissingFile)?;

        let folder = Category::resolve(Some(&request.tag)).folder();
        let file_name = storage_name(&request.tag, Utc::now().timestamp_millis(), &request.filename);

        tracing::debug!(file_name = %file_name, folder, size = request.content.len(), "Uploading image");

        let uploaded = self
            .provider
            .upload(UploadFile {
                bytes: request.content,
                file_name,
                folder: folder.to_string(),
            })
            .await?;

        tracing::info!(file_id = %uploaded.file_id, path = %uploaded.file_path, "Image uploaded");

        Ok(UploadOutcome {
            url: uploaded.url,
            file_id: uploaded.file_id,
            file_path: uploaded.file_path,
            folder,
            tag: request.tag,
        })
    }

    /// List images, newest first.
    ///
    /// A known tag limits the listing to its folder; an unknown or missing
    /// tag lists everything.
    pub async fn list(&self, tag: Option<&str>, limit: u32) -> Result<ListOutcome> {
        let folder = tag.and_then(Category::lookup).map(Category::folder);

        let files = self
            .provider
            .list_files(ListFilesQuery {
                path: folder.map(str::to_string),
                sort: Some(ListSort::DescCreated),
                limit: Some(limit),
                search_query: None,
            })
            .await?;

        Ok(ListOutcome { files, folder })
    }

    /// Delete an image by provider id.
    pub async fn delete_by_id(&self, file_id: &str) -> Result<serde_json::Value> {
        if file_id.trim().is_empty() {
            return Err(Error::InvalidInput("file id is required".to_string()));
        }

        let result = self.provider.delete_file(file_id).await?;
        tracing::info!(file_id, "Image deleted");
        Ok(result)
    }

    /// Delete an image by its public CDN URL.
    ///
    /// The folder and base name are recovered from the URL and the provider
    /// listing is searched for a match. When several files match, the first
    /// one the provider returns is deleted.
    pub async fn delete_by_url(&self, image_url: &str) -> Result<serde_json::Value> {
        if image_url.trim().is_empty() {
            return Err(Error::InvalidInput("image URL is required".to_string()));
        }

        let resolved = self
            .resolver
            .resolve(image_url)
            .ok_or_else(|| Error::InvalidResourceUrl(image_url.to_string()))?;

        let matches = self
            .provider
            .list_files(ListFilesQuery {
                path: Some(resolved.search_folder()),
                search_query: Some(resolved.search_query()),
                ..Default::default()
            })
            .await?;

        let file = matches
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound("file".to_string()))?;

        tracing::debug!(file_id = %file.file_id, url = image_url, "Resolved CDN URL to file");
        self.delete_by_id(&file.file_id).await
    }
}
