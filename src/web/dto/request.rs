//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `POST /upload`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Category tag selecting the folder.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Query parameters for `GET /images`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImagesQuery {
    /// Category tag to filter by. Unknown tags list everything.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Maximum number of images (default 30).
    pub limit: Option<String>,
}

/// Link preview request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FetchUrlRequest {
    /// Page to preview.
    #[serde(default)]
    pub url: Option<String>,
}

/// Delete-by-URL request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteByUrlRequest {
    /// Public CDN URL of the image.
    #[serde(default)]
    pub image_url: Option<String>,
}
