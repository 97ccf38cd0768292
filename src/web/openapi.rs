//! OpenAPI document for the web API.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use super::dto::{
    DeleteByUrlRequest, DeleteResponse, FetchUrlRequest, ImagesResponse, LinkPreviewResponse,
    UploadResponse,
};
use super::error::ErrorBody;
use super::handlers;
use crate::preview::LinkPreview;
use crate::provider::StoredFile;

/// OpenAPI description of every endpoint.
#[derive(OpenApi)]
#[openapi(
    info(title = "mediagate", description = "Image CDN gateway and link preview API"),
    paths(
        handlers::upload::upload_image,
        handlers::images::list_images,
        handlers::images::delete_image,
        handlers::images::delete_image_by_url,
        handlers::preview::fetch_url,
    ),
    components(schemas(
        UploadResponse,
        ImagesResponse,
        StoredFile,
        DeleteResponse,
        DeleteByUrlRequest,
        FetchUrlRequest,
        LinkPreviewResponse,
        LinkPreview,
        ErrorBody,
    )),
    tags(
        (name = "images", description = "Upload, list and delete images"),
        (name = "preview", description = "Link previews")
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document at `/api-docs/openapi.json`.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
