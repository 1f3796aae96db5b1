//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Upload and storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Malformed multipart body.
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// A file arrived under a field that only accepts one file and already has it.
    #[error("Unexpected field")]
    UnexpectedField(String),

    /// No stored file under this key.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Backend setup or write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key would escape the storage directory.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

impl StorageError {
    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Convert to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Multipart(_) | Self::UnexpectedField(_) | Self::InvalidFileName(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) | Self::Io(_) => 500,
        }
    }
}

impl From<multer::Error> for StorageError {
    fn from(err: multer::Error) -> Self {
        Self::Multipart(err.to_string())
    }
}

impl From<StorageError> for stockroom_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnexpectedField(_) => Self::BadRequest(err.to_string()),
            StorageError::Multipart(msg) | StorageError::InvalidFileName(msg) => {
                Self::BadRequest(msg)
            }
            StorageError::NotFound(key) => Self::NotFound(key),
            StorageError::Io(e) => Self::Io(e),
            StorageError::Storage(msg) => Self::Internal(msg),
        }
    }
}
