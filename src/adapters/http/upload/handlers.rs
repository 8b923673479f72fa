//! HTTP handler for CSV uploads.

use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{StoreUploadCommand, StoreUploadHandler};
use crate::ports::{UploadStorage, UploadStorageError};

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Body of a 400 when the request has no `file` part.
pub const NO_FILE_MESSAGE: &str = "No se subió ningún archivo.";

/// Body of a 400 when the file name is unusable.
pub const INVALID_FILE_NAME_MESSAGE: &str = "El nombre del archivo no es válido.";

/// Body of a 413.
pub const FILE_TOO_LARGE_MESSAGE: &str = "El archivo es demasiado grande.";

/// Body of a 500 when the file could not be written.
pub const STORAGE_FAILURE_MESSAGE: &str = "Hubo un problema al guardar el archivo.";

/// Shared state for the upload endpoint.
#[derive(Clone)]
pub struct UploadAppState {
    pub storage: Arc<dyn UploadStorage>,
}

impl UploadAppState {
    pub fn store_upload_handler(&self) -> StoreUploadHandler {
        StoreUploadHandler::new(self.storage.clone())
    }
}

/// POST /upload-csv - Store the `file` part of a multipart form
pub async fn upload_csv(
    State(state): State<UploadAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, UploadApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Upload is not a multipart request");
        UploadApiError::NoFile
    })?;

    let cmd = read_file_field(&mut multipart)
        .await?
        .ok_or(UploadApiError::NoFile)?;

    let stored = state.store_upload_handler().handle(cmd).await?;

    Ok(format!(
        "Archivo CSV subido correctamente: {}",
        stored.file_name
    ))
}

/// Reads the first `file` part that carries a file name.
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<StoreUploadCommand>, UploadApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await?;
        return Ok(Some(StoreUploadCommand {
            file_name,
            data: data.to_vec(),
        }));
    }
    Ok(None)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error for the upload endpoint, rendered as plain text.
#[derive(Debug)]
pub enum UploadApiError {
    NoFile,
    TooLarge,
    InvalidFileName,
    Storage,
}

impl From<MultipartError> for UploadApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(error = %err, "Upload exceeds body limit");
            return Self::TooLarge;
        }
        tracing::debug!(error = %err, "Malformed multipart body");
        Self::NoFile
    }
}

impl From<UploadStorageError> for UploadApiError {
    fn from(err: UploadStorageError) -> Self {
        match err {
            UploadStorageError::InvalidFileName { .. } => Self::InvalidFileName,
            UploadStorageError::FileTooLarge { .. } => Self::TooLarge,
            UploadStorageError::Io { message } => {
                tracing::error!(error = %message, "Failed to store upload");
                Self::Storage
            }
        }
    }
}

impl IntoResponse for UploadApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UploadApiError::NoFile => (StatusCode::BAD_REQUEST, NO_FILE_MESSAGE),
            UploadApiError::InvalidFileName => (StatusCode::BAD_REQUEST, INVALID_FILE_NAME_MESSAGE),
            UploadApiError::TooLarge => (StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE_MESSAGE),
            UploadApiError::Storage => (StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE_MESSAGE),
        };
        (status, message).into_response()
    }
}
