//! Types for link previews.

use serde::Serialize;
use utoipa::ToSchema;

/// Title, description and image of a remote page.
///
/// Every field may be empty; a missing tag is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct LinkPreview {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Preview image URL.
    pub image: String,
}
