//! API error handling for the web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `0`; only present on link tool endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<u8>,
    /// Short message.
    pub error: String,
    /// Underlying diagnostic detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<String>,
    link_tool: bool,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            link_tool: false,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Map a crate error to a response, using `message` as the short message
    /// for collaborator failures.
    ///
    /// Caller errors become 400 and missing resources 404. Everything else is
    /// logged and becomes a 500 with the error text as `details`.
    pub fn from_error(message: impl Into<String>, err: crate::Error) -> Self {
        use crate::Error;

        match &err {
            Error::MissingFile => ApiError::bad_request("No file provided"),
            Error::InvalidResourceUrl(_) => ApiError::bad_request("Invalid resource URL"),
            Error::NotFound(_) => ApiError::not_found("File not found"),
            _ if err.is_client_error() => {
                ApiError::bad_request(message).with_details(err.to_string())
            }
            _ => {
                let message = message.into();
                tracing::error!(error = %err, "{}", message);
                ApiError::internal(message).with_details(err.to_string())
            }
        }
    }

    /// Attach diagnostic detail.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Render in the link tool shape (`success: 0`).
    pub fn link_tool(mut self) -> Self {
        self.link_tool = true;
        self
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Short message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            success: self.link_tool.then_some(0),
            error: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
