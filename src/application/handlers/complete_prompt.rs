//! CompletePromptHandler - Single-turn completion with a fixed fallback.
//!
//! The handler never fails: any provider error is logged and replaced by the
//! configured fallback text.

use std::sync::Arc;

use crate::ports::{CompletionProvider, CompletionRequest};

/// Command to complete a prompt.
#[derive(Debug, Clone)]
pub struct CompletePromptCommand {
    pub prompt: String,
}

impl CompletePromptCommand {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Result of a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletePromptResult {
    /// Completion text, or the fallback message.
    pub text: String,
    /// Whether `text` is the fallback message.
    pub fell_back: bool,
}

/// Handler for prompt completion.
pub struct CompletePromptHandler {
    provider: Arc<dyn CompletionProvider>,
    fallback_message: String,
}

impl CompletePromptHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, fallback_message: impl Into<String>) -> Self {
        Self {
            provider,
            fallback_message: fallback_message.into(),
        }
    }

    pub async fn handle(&self, cmd: CompletePromptCommand) -> CompletePromptResult {
        let request = CompletionRequest::new(cmd.prompt);

        match self.provider.complete(request).await {
            Ok(response) => CompletePromptResult {
                text: response.text,
                fell_back: false,
            },
            Err(e) => {
                let info = self.provider.provider_info();
                tracing::error!(
                    provider = %info.name,
                    model = %info.model,
                    error = %e,
                    "Completion failed, returning fallback message"
                );
                CompletePromptResult {
                    text: self.fallback_message.clone(),
                    fell_back: true,
                }
            }
        }
    }
}
