//! Error types for mediagate.

use std::fmt;

use thiserror::Error;

/// Storage provider operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOperation {
    /// File upload.
    Upload,
    /// File listing or search.
    List,
    /// File deletion.
    Delete,
}

impl fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderOperation::Upload => "upload",
            ProviderOperation::List => "list",
            ProviderOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Common error type for mediagate.
#[derive(Error, Debug)]
pub enum Error {
    /// A required request field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upload request carried no file payload.
    #[error("no file provided")]
    MissingFile,

    /// Outbound request failed before a response arrived (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be read.
    #[error("read error: {0}")]
    Read(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The given URL does not belong to the configured CDN endpoint.
    #[error("invalid resource URL: {0}")]
    InvalidResourceUrl(String),

    /// The storage provider rejected or failed an operation.
    #[error("{operation} failed: {message}")]
    Provider {
        /// Operation that failed.
        operation: ProviderOperation,
        /// Underlying provider message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a provider error for the given operation.
    pub fn provider(operation: ProviderOperation, message: impl Into<String>) -> Self {
        Error::Provider {
            operation,
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller rather than by a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::MissingFile | Error::InvalidResourceUrl(_)
        )
    }
}

/// Result type alias for mediagate operations.
pub type Result<T> = std::result::Result<T, Error>;
