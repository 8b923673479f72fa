//! Upload storage adapters.

mod local_upload_storage;

pub use local_upload_storage::{LocalUploadStorage, DEFAULT_MAX_UPLOAD_BYTES};
