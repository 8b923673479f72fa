//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates calls between ports. Handlers own no state beyond
//! the adapters they are built with.

pub mod handlers;
mod session_scope;

pub use handlers::{
    // Assistant
    AskAssistantCommand, AskAssistantError, AskAssistantHandler, AskAssistantResult,
    // Completion
    CompletePromptCommand, CompletePromptHandler, CompletePromptResult,
    // Relay
    RelayMessageCommand, RelayMessageError, RelayMessageHandler,
    // Upload
    StoreUploadCommand, StoreUploadHandler,
};
pub use session_scope::SessionScope;
