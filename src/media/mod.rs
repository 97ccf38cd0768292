//! Image management for mediagate.
//!
//! Category-to-folder classification and the upload, list and delete
//! operations built on the storage provider.

pub mod category;
pub mod service;

pub use category::{Category, DEFAULT_TAG};
pub use service::{
    parse_limit, storage_name, ListOutcome, MediaService, UploadOutcome, UploadRequest,
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
