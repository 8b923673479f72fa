//! Axum router configuration for the upload endpoint.

use axum::extract::DefaultBodyLimit;
use axum::{routing::post, Router};

use super::handlers::{upload_csv, UploadAppState};

/// Room left in the body limit for multipart boundaries and part headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the upload router.
///
/// Request bodies are capped at `max_file_bytes` plus multipart framing.
///
/// # Routes
/// - `POST /upload-csv` - Store the `file` part of a multipart form
pub fn upload_routes(max_file_bytes: u64) -> Router<UploadAppState> {
    let limit = usize::try_from(max_file_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/upload-csv", post(upload_csv))
        .layer(DefaultBodyLimit::max(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::super::handlers::{FILE_TOO_LARGE_MESSAGE, INVALID_FILE_NAME_MESSAGE, NO_FILE_MESSAGE};
    use crate::adapters::storage::LocalUploadStorage;

    const BOUNDARY: &str = "----assistant-bridge-test";

    fn app(dir: &TempDir, max_bytes: u64) -> Router {
        let storage = LocalUploadStorage::new(dir.path()).with_max_bytes(max_bytes);
        upload_routes(max_bytes).with_state(UploadAppState {
            storage: Arc::new(storage),
        })
    }

    fn multipart_body(field: &str, file_name: Option<&str>, content: &[u8]) -> Vec<u8> {
        let disposition = match file_name {
            Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
            None => format!("form-data; name=\"{}\"", field),
        };
        let mut body = format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: text/csv\r\n\r\n",
            BOUNDARY, disposition
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn multipart_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload-csv")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn upload_stores_file_and_names_it() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir, 1024)
            .oneshot(multipart_request(multipart_body(
                "file",
                Some("a.csv"),
                b"x,y\n1,2\n",
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("a.csv"));
        assert_eq!(text, "Archivo CSV subido correctamente: a.csv");
        assert_eq!(std::fs::read(dir.path().join("a.csv")).unwrap(), b"x,y\n1,2\n");
    }

    #[tokio::test]
    async fn upload_without_file_part_is_bad_request() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir, 1024)
            .oneshot(multipart_request(multipart_body("other", Some("a.csv"), b"x")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, NO_FILE_MESSAGE);
    }

    #[tokio::test]
    async fn upload_of_plain_field_is_bad_request() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir, 1024)
            .oneshot(multipart_request(multipart_body("file", None, b"x")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, NO_FILE_MESSAGE);
    }

    #[tokio::test]
    async fn non_multipart_body_is_bad_request() {
        let dir = TempDir::new().unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/upload-csv")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app(&dir, 1024).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, NO_FILE_MESSAGE);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir, 8)
            .oneshot(multipart_request(multipart_body(
                "file",
                Some("big.csv"),
                &[b'a'; 64],
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_text(response).await, FILE_TOO_LARGE_MESSAGE);
        assert!(!dir.path().join("big.csv").exists());
    }

    #[tokio::test]
    async fn unusable_file_name_is_rejected() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir, 1024)
            .oneshot(multipart_request(multipart_body("file", Some("../"), b"x")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, INVALID_FILE_NAME_MESSAGE);
    }
}
