//! Upload Storage Port - Interface for persisting uploaded files.
//!
//! Uploaded files are kept under the client-supplied name. Implementations
//! decide where the bytes live; the local filesystem adapter is the default.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Port for storing uploaded files.
#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Stores the file under the given client-supplied name.
    ///
    /// # Errors
    ///
    /// - `UploadStorageError::InvalidFileName` if no usable name remains after
    ///   stripping directory components.
    /// - `UploadStorageError::FileTooLarge` if the content exceeds the limit.
    /// - `UploadStorageError::Io` on filesystem failure.
    async fn store(&self, file_name: &str, data: &[u8]) -> Result<StoredUpload, UploadStorageError>;
}

/// A file persisted by [`UploadStorage::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Name the file was stored under.
    pub file_name: String,
    /// Location of the stored file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

/// Errors that can occur while storing an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadStorageError {
    /// The client-supplied name has no usable file name component.
    #[error("Invalid file name: {file_name:?}")]
    InvalidFileName { file_name: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl UploadStorageError {
    /// Creates an invalid file name error.
    pub fn invalid_file_name(file_name: impl Into<String>) -> Self {
        Self::InvalidFileName {
            file_name: file_name.into(),
        }
    }

    /// Creates a file too large error.
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
