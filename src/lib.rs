//! mediagate - image CDN gateway.
//!
//! Thin HTTP backend in front of the ImageKit CDN: image upload, listing and
//! deletion, plus link preview metadata for rich-link rendering.

pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod preview;
pub mod provider;
pub mod web;

pub use config::Config;
pub use error::{Error, ProviderOperation, Result};
pub use media::{Category, MediaService, UploadRequest};
pub use preview::{LinkPreview, LinkPreviewer};
pub use provider::{ImageKitProvider, ResolvedPath, ResourcePathResolver, StorageProvider};
