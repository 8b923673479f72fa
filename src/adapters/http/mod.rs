//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own module with DTOs, handlers and routes.
//! [`app_router`] merges them into the service router.

pub mod relay;
pub mod system;
pub mod upload;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use relay::{relay_routes, RelayAppState, RelaySettings};
pub use system::system_routes;
pub use upload::{upload_routes, UploadAppState};

/// Build the complete service router.
pub fn app_router(relay: RelayAppState, upload: UploadAppState, max_upload_bytes: u64) -> Router {
    Router::new()
        .merge(system_routes())
        .merge(relay_routes().with_state(relay))
        .merge(upload_routes(max_upload_bytes).with_state(upload))
        .layer(TraceLayer::new_for_http())
}
