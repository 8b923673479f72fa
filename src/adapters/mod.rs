//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Completion providers (OpenAI, mock)
//! - `assistant` - Conversational assistant backends (Watson Assistant, mock)
//! - `storage` - Upload storage (local filesystem)
//! - `http` - REST API

pub mod ai;
pub mod assistant;
pub mod http;
pub mod storage;

pub use ai::{MockCompletionProvider, OpenAIConfig, OpenAIProvider};
pub use assistant::{MockAssistantSession, WatsonAssistant, WatsonConfig};
pub use http::app_router;
pub use storage::LocalUploadStorage;
