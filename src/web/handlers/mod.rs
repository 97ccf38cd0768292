//! API handlers for the web layer.

pub mod images;
pub mod preview;
pub mod upload;

pub use images::*;
pub use preview::*;
pub use upload::*;

use crate::media::MediaService;
use crate::preview::LinkPreviewer;

/// Shared application state.
///
/// Holds the collaborators every handler needs; built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Image operations.
    pub media: MediaService,
    /// Link preview fetcher.
    pub previewer: LinkPreviewer,
    /// Maximum upload size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new(media: MediaService, previewer: LinkPreviewer, max_upload_size: usize) -> Self {
        Self {
            media,
            previewer,
            max_upload_size,
        }
    }
}
