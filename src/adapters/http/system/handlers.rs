//! HTTP handlers for service-level endpoints.

use axum::extract::Json;
use axum::response::IntoResponse;
use serde::Serialize;

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "¡Bienvenido! El servidor está funcionando correctamente.";

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET / - Welcome text
pub async fn welcome() -> impl IntoResponse {
    WELCOME_MESSAGE
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
