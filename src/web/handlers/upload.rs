//! Upload handler.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    Json,
};
use std::sync::Arc;

use crate::media::UploadRequest;
use crate::web::dto::{UploadQuery, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "image";

/// Multipart field carrying the category tag.
const TYPE_FIELD: &str = "type";

/// POST /upload - Upload an image.
///
/// Request body: multipart/form-data with an `image` file field. The category
/// comes from the `type` query parameter or, failing that, a `type` form field.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "images",
    params(UploadQuery),
    responses(
        (status = 200, description = "Image uploaded", body = UploadResponse),
        (status = 400, description = "No file, invalid multipart data or file too large", body = crate::web::error::ErrorBody),
        (status = 500, description = "Provider upload failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // not a multipart request at all: nothing attached
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Upload without multipart body: {}", e);
        ApiError::bad_request("No file provided")
    })?;

    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut form_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            FILE_FIELD => {
                filename = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::warn!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            TYPE_FIELD => {
                form_type = Some(field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read type field: {}", e);
                    ApiError::bad_request("Invalid type field")
                })?);
            }
            _ => {}
        }
    }

    if let Some(content) = &content {
        if content.len() > state.max_upload_size {
            let max_mb = state.max_upload_size / 1024 / 1024;
            return Err(ApiError::bad_request(format!(
                "File too large (max {}MB)",
                max_mb
            )));
        }
    }

    let tag = query.kind.filter(|s| !s.is_empty()).or(form_type);
    let request = content.map(|content| UploadRequest::new(content, filename, tag));

    let outcome = state
        .media
        .upload(request)
        .await
        .map_err(|e| ApiError::from_error("Upload failed", e))?;

    Ok(Json(UploadResponse::from(outcome)))
}
