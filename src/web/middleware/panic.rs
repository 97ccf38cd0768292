//! Panic recovery for request handlers.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::web::error::ApiError;

/// Turn a handler panic into a 500 response.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`; the panic is
/// logged and the server keeps serving other requests.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    ApiError::internal("Internal server error").into_response()
}
