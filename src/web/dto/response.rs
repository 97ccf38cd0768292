//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::media::{ListOutcome, UploadOutcome};
use crate::preview::LinkPreview;
use crate::provider::StoredFile;

/// Folder reported when a listing is not filtered.
const ALL_FOLDERS: &str = "all";

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Status message.
    pub message: String,
    /// Public CDN URL.
    pub image_url: String,
    /// Provider file id.
    pub file_id: String,
    /// Path within the provider.
    pub file_path: String,
    /// Folder the image was stored in.
    pub folder: String,
    /// Category tag as sent by the caller.
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            message: "Image uploaded successfully".to_string(),
            image_url: outcome.url,
            file_id: outcome.file_id,
            file_path: outcome.file_path,
            folder: outcome.folder.to_string(),
            kind: outcome.tag,
        }
    }
}

/// Link preview response in the Editor.js LinkTool shape.
#[derive(Debug, Serialize, ToSchema)]
pub struct LinkPreviewResponse {
    /// Always `1`.
    pub success: u8,
    /// Extracted metadata.
    pub meta: LinkPreview,
}

impl From<LinkPreview> for LinkPreviewResponse {
    fn from(meta: LinkPreview) -> Self {
        Self { success: 1, meta }
    }
}

/// Image listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImagesResponse {
    /// Files as returned by the provider.
    pub images: Vec<StoredFile>,
    /// Folder listed, or `all`.
    pub folder: String,
    /// Number of files returned.
    pub count: usize,
}

impl From<ListOutcome> for ImagesResponse {
    fn from(outcome: ListOutcome) -> Self {
        Self {
            count: outcome.files.len(),
            folder: outcome.folder.unwrap_or(ALL_FOLDERS).to_string(),
            images: outcome.files,
        }
    }
}

/// Delete response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Status message.
    pub message: String,
    /// Provider response.
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

impl DeleteResponse {
    /// Wrap a provider delete result.
    pub fn deleted(result: serde_json::Value) -> Self {
        Self {
            message: "Deleted".to_string(),
            result,
        }
    }
}
