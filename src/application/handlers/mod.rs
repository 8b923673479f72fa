//! Application handlers.
//!
//! Command handlers that orchestrate calls across ports.

pub mod ask_assistant;
pub mod complete_prompt;
pub mod relay_message;
pub mod store_upload;

pub use ask_assistant::{
    AskAssistantCommand, AskAssistantError, AskAssistantHandler, AskAssistantResult,
};
pub use complete_prompt::{CompletePromptCommand, CompletePromptHandler, CompletePromptResult};
pub use relay_message::{RelayMessageCommand, RelayMessageError, RelayMessageHandler};
pub use store_upload::{StoreUploadCommand, StoreUploadHandler};
