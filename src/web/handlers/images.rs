//! Image listing and deletion handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::media::parse_limit;
use crate::web::dto::{DeleteByUrlRequest, DeleteResponse, ImagesQuery, ImagesResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /images - List images, newest first.
#[utoipa::path(
    get,
    path = "/images",
    tag = "images",
    params(ImagesQuery),
    responses(
        (status = 200, description = "Images from the selected folder, or all images", body = ImagesResponse),
        (status = 500, description = "Provider listing failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImagesQuery>,
) -> Result<Json<ImagesResponse>, ApiError> {
    let limit = parse_limit(query.limit.as_deref());

    let outcome = state
        .media
        .list(query.kind.as_deref(), limit)
        .await
        .map_err(|e| ApiError::from_error("Failed to fetch images", e))?;

    Ok(Json(ImagesResponse::from(outcome)))
}

/// DELETE /delete/:file_id - Delete an image by provider id.
#[utoipa::path(
    delete,
    path = "/delete/{file_id}",
    tag = "images",
    params(
        ("file_id" = String, Path, description = "Provider file id")
    ),
    responses(
        (status = 200, description = "Image deleted", body = DeleteResponse),
        (status = 500, description = "Provider deletion failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let result = state
        .media
        .delete_by_id(&file_id)
        .await
        .map_err(|e| ApiError::from_error("Delete failed", e))?;

    Ok(Json(DeleteResponse::deleted(result)))
}

/// POST /delete - Delete an image by its public CDN URL.
#[utoipa::path(
    post,
    path = "/delete",
    tag = "images",
    request_body = DeleteByUrlRequest,
    responses(
        (status = 200, description = "Image deleted", body = DeleteResponse),
        (status = 400, description = "Missing or unrecognized image URL", body = crate::web::error::ErrorBody),
        (status = 404, description = "No stored file matches the URL", body = crate::web::error::ErrorBody),
        (status = 500, description = "Provider lookup or deletion failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn delete_image_by_url(
    State(state): State<Arc<AppState>>,
    body: Option<Json<DeleteByUrlRequest>>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let image_url = body
        .and_then(|Json(req)| req.image_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Image URL is required"))?;

    let result = state
        .media
        .delete_by_url(&image_url)
        .await
        .map_err(|e| ApiError::from_error("Delete failed", e))?;

    Ok(Json(DeleteResponse::deleted(result)))
}
