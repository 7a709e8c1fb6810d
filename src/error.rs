//! Error types for content operations

use thiserror::Error;

/// Errors that can occur while decoding, importing or persisting content
#[derive(Debug, Error)]
pub enum ContentError {
    /// Character encoding error
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Malformed or unsupported JSON import
    #[error("Import error: {0}")]
    ImportError(String),
    /// Preference storage failed
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ContentError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            ContentError::EncodingError(_) => 2,
            ContentError::InvalidInput(_) => 5,
            ContentError::ImportError(_) => 6,
            ContentError::StorageError(_) => 7,
            ContentError::InternalError(_) => 99,
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::ImportError(e.to_string())
    }
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::StorageError(e.to_string())
    }
}
