//! Axum router configuration for service-level endpoints.

use axum::{routing::get, Router};

use super::handlers::{health, welcome};

/// Create the system router.
///
/// # Routes
/// - `GET /` - Welcome text
/// - `GET /health` - Liveness check
pub fn system_routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::super::handlers::WELCOME_MESSAGE;

    async fn get_path(path: &str) -> axum::response::Response {
        let app: Router = system_routes();
        app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn root_returns_welcome_text() {
        let response = get_path("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), WELCOME_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = get_path("/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "assistant-bridge");
    }
}
