//! Link preview module.
//!
//! Fetches a remote page and extracts the title, description and image used
//! to render rich links.

pub mod extractor;
pub mod fetcher;
pub mod types;

pub use extractor::extract;
pub use fetcher::LinkPreviewer;
pub use types::LinkPreview;
