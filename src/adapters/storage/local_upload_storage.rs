//! Local Filesystem Upload Storage - Implementation of UploadStorage.
//!
//! Stores uploaded files flat in a single directory under their original
//! names. A file with the same name is replaced.
//!
//! # Atomic Writes
//!
//! Uses a write-to-temp-then-rename pattern:
//! 1. Write content to `.{uuid}.part`
//! 2. Sync to disk
//! 3. Rename to `{name}`
//!
//! Readers never observe a partially written upload. The temp file is
//! removed when any step fails.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{StoredUpload, UploadStorage, UploadStorageError};

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for uploads.
#[derive(Debug, Clone)]
pub struct LocalUploadStorage {
    /// Directory holding all uploads.
    base_path: PathBuf,
    /// Largest accepted upload.
    max_bytes: u64,
}

impl LocalUploadStorage {
    /// Creates a storage rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Sets the upload size limit.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Reduces a client-supplied name to its final path component.
    ///
    /// Both `/` and `\` count as separators since browsers on Windows may
    /// send full paths.
    fn sanitize_file_name(raw: &str) -> Result<&str, UploadStorageError> {
        let name = raw.rsplit(|c| c == '/' || c == '\\').next().unwrap_or_default().trim();

        if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
            return Err(UploadStorageError::invalid_file_name(raw));
        }
        Ok(name)
    }

    /// Computes SHA-256 checksum of the given content.
    fn compute_checksum(data: &[u8]) -> String {
        format!("{:x}", Sha256::digest(data))
    }

    async fn ensure_base_dir(&self) -> Result<(), UploadStorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            UploadStorageError::io(format!(
                "Failed to create upload directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    async fn write_then_rename(
        temp_path: &Path,
        final_path: &Path,
        data: &[u8],
    ) -> Result<(), UploadStorageError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            UploadStorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(data).await.map_err(|e| {
            UploadStorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            UploadStorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            UploadStorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl UploadStorage for LocalUploadStorage {
    async fn store(&self, file_name: &str, data: &[u8]) -> Result<StoredUpload, UploadStorageError> {
        let name = Self::sanitize_file_name(file_name)?;

        let size = data.len() as u64;
        if size > self.max_bytes {
            return Err(UploadStorageError::file_too_large(size, self.max_bytes));
        }

        self.ensure_base_dir().await?;

        let temp_path = self.base_path.join(format!(".{}.part", Uuid::new_v4()));
        let final_path = self.base_path.join(name);

        if let Err(e) = Self::write_then_rename(&temp_path, &final_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        Ok(StoredUpload {
            file_name: name.to_string(),
            path: final_path,
            size_bytes: size,
            checksum: Self::compute_checksum(data),
        })
    }
}
