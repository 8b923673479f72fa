//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `CompletionProvider` - Single-turn text completion model
//! - `AssistantSession` - Stateful conversational assistant backend
//! - `UploadStorage` - Persistence for uploaded files

mod assistant_session;
mod completion_provider;
mod upload_storage;

pub use assistant_session::{
    AssistantError, AssistantReply, AssistantSession, GenericItem, TEXT_RESPONSE_TYPE,
};
pub use completion_provider::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};
pub use upload_storage::{StoredUpload, UploadStorage, UploadStorageError};
