//! Router configuration for the web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_image, delete_image_by_url, fetch_url, list_images, upload_image, AppState,
};
use super::middleware::{create_cors_layer, handle_panic};

/// Extra room for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let upload_limit = app_state.max_upload_size + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/fetchUrl", post(fetch_url))
        .route("/images", get(list_images))
        .route("/delete/:file_id", delete(delete_image))
        .route("/delete", post(delete_image_by_url))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
