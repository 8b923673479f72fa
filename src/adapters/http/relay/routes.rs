//! Axum router configuration for the relay endpoints.

use axum::{routing::post, Router};

use super::handlers::{ask_assistant, complete_prompt, relay_message, RelayAppState};

/// Create the relay router.
///
/// # Routes
/// - `POST /gpt` - Complete a prompt
/// - `POST /watson` - Ask the assistant
/// - `POST /watson-to-gpt` - Ask the assistant and enrich the reply
pub fn relay_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/gpt", post(complete_prompt))
        .route("/watson", post(ask_assistant))
        .route("/watson-to-gpt", post(relay_message))
}
