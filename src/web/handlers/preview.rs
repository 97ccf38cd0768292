//! Link preview handler for the Editor.js LinkTool.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{FetchUrlRequest, LinkPreviewResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /fetchUrl - Fetch a page and return its preview metadata.
#[utoipa::path(
    post,
    path = "/fetchUrl",
    tag = "preview",
    request_body = FetchUrlRequest,
    responses(
        (status = 200, description = "Preview extracted", body = LinkPreviewResponse),
        (status = 400, description = "Missing or unusable URL", body = crate::web::error::ErrorBody),
        (status = 500, description = "Page could not be fetched", body = crate::web::error::ErrorBody)
    )
)]
pub async fn fetch_url(
    State(state): State<Arc<AppState>>,
    body: Option<Json<FetchUrlRequest>>,
) -> Result<Json<LinkPreviewResponse>, ApiError> {
    let url = body
        .and_then(|Json(req)| req.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No URL provided").link_tool())?;

    let preview = state
        .previewer
        .preview(&url)
        .await
        .map_err(|e| ApiError::from_error("Failed to fetch link preview", e).link_tool())?;

    Ok(Json(LinkPreviewResponse::from(preview)))
}
