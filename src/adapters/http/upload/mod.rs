//! HTTP adapter for file uploads.
//!
//! - `POST /upload-csv` - Store an uploaded CSV file

pub mod handlers;
pub mod routes;

pub use handlers::{UploadApiError, UploadAppState};
pub use routes::upload_routes;
