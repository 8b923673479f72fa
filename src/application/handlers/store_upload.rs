//! StoreUploadHandler - Persists an uploaded file.

use std::sync::Arc;

use crate::ports::{StoredUpload, UploadStorage, UploadStorageError};

/// Command to store an uploaded file.
#[derive(Debug, Clone)]
pub struct StoreUploadCommand {
    /// Name as sent by the client.
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Handler for file uploads.
pub struct StoreUploadHandler {
    storage: Arc<dyn UploadStorage>,
}

impl StoreUploadHandler {
    pub fn new(storage: Arc<dyn UploadStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, cmd: StoreUploadCommand) -> Result<StoredUpload, UploadStorageError> {
        match self.storage.store(&cmd.file_name, &cmd.data).await {
            Ok(stored) => {
                tracing::info!(
                    file_name = %stored.file_name,
                    path = %stored.path.display(),
                    size_bytes = stored.size_bytes,
                    checksum = %stored.checksum,
                    "Upload stored"
                );
                Ok(stored)
            }
            Err(e) => {
                tracing::warn!(file_name = %cmd.file_name, error = %e, "Upload rejected");
                Err(e)
            }
        }
    }
}
