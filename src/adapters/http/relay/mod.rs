//! HTTP adapter for the relay endpoints.
//!
//! - `POST /gpt` - Complete a prompt
//! - `POST /watson` - Send a message to the assistant
//! - `POST /watson-to-gpt` - Send a message and enrich the reply

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{RelayApiError, RelayAppState, RelaySettings};
pub use routes::relay_routes;
