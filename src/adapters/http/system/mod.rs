//! HTTP adapter for service-level endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{HealthResponse, WELCOME_MESSAGE};
pub use routes::system_routes;
