//! RelayMessageHandler - Assistant reply, optionally enriched by the completion model.

use std::sync::Arc;
use thiserror::Error;

use super::ask_assistant::{AskAssistantCommand, AskAssistantError, AskAssistantHandler};
use super::complete_prompt::{CompletePromptCommand, CompletePromptHandler};
use crate::domain::MessageExchange;

/// Command to relay a message through the pipeline.
#[derive(Debug, Clone)]
pub struct RelayMessageCommand {
    pub session_id: Option<String>,
    pub message: String,
}

impl From<RelayMessageCommand> for AskAssistantCommand {
    fn from(cmd: RelayMessageCommand) -> Self {
        AskAssistantCommand {
            session_id: cmd.session_id,
            message: cmd.message,
        }
    }
}

/// Errors that can occur while relaying.
///
/// Only the assistant step can fail; the completion step falls back.
#[derive(Debug, Clone, Error)]
pub enum RelayMessageError {
    #[error(transparent)]
    Assistant(#[from] AskAssistantError),
}

/// Handler chaining the assistant and completion steps.
pub struct RelayMessageHandler {
    ask: Arc<AskAssistantHandler>,
    complete: Arc<CompletePromptHandler>,
    enrich: bool,
}

impl RelayMessageHandler {
    pub fn new(
        ask: Arc<AskAssistantHandler>,
        complete: Arc<CompletePromptHandler>,
        enrich: bool,
    ) -> Self {
        Self {
            ask,
            complete,
            enrich,
        }
    }

    pub async fn handle(
        &self,
        cmd: RelayMessageCommand,
    ) -> Result<MessageExchange, RelayMessageError> {
        let inbound = cmd.message.clone();
        let answer = self.ask.handle(cmd.into()).await?;

        let exchange = MessageExchange::new(inbound, answer.reply);
        if !self.enrich {
            return Ok(exchange);
        }

        let completion = self
            .complete
            .handle(CompletePromptCommand::new(exchange.reply()))
            .await;
        tracing::debug!(
            session_id = %answer.session,
            fell_back = completion.fell_back,
            "Assistant reply enriched"
        );

        Ok(exchange.with_enrichment(completion.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionProvider, MockError};
    use crate::adapters::assistant::{MockAssistantError, MockAssistantSession};
    use crate::domain::SessionMode;

    const FALLBACK: &str = "fallback";

    fn relay(
        assistant: &MockAssistantSession,
        completion: &MockCompletionProvider,
        enrich: bool,
    ) -> RelayMessageHandler {
        let ask = AskAssistantHandler::new(Arc::new(assistant.clone()), SessionMode::AdapterManaged);
        let complete = CompletePromptHandler::new(Arc::new(completion.clone()), FALLBACK);
        RelayMessageHandler::new(Arc::new(ask), Arc::new(complete), enrich)
    }

    fn command(message: &str) -> RelayMessageCommand {
        RelayMessageCommand {
            session_id: None,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn reply_is_passed_verbatim_to_completion() {
        let assistant = MockAssistantSession::new().with_reply("X");
        let completion = MockCompletionProvider::new().with_response("Y");

        let exchange = relay(&assistant, &completion, true)
            .handle(command("hola"))
            .await
            .unwrap();

        assert_eq!(exchange.inbound(), "hola");
        assert_eq!(exchange.reply(), "X");
        assert_eq!(exchange.enrichment(), Some("Y"));
        assert_eq!(completion.get_calls()[0].prompt, "X");
    }

    #[tokio::test]
    async fn enrichment_disabled_skips_completion() {
        let assistant = MockAssistantSession::new().with_reply("X");
        let completion = MockCompletionProvider::new();

        let exchange = relay(&assistant, &completion, false)
            .handle(command("hola"))
            .await
            .unwrap();

        assert_eq!(exchange.reply(), "X");
        assert_eq!(exchange.enrichment(), None);
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn assistant_failure_never_reaches_completion() {
        let assistant =
            MockAssistantSession::new().with_open_error(MockAssistantError::Unavailable {
                message: "down".to_string(),
            });
        let completion = MockCompletionProvider::new();

        let result = relay(&assistant, &completion, true)
            .handle(command("hola"))
            .await;

        assert!(matches!(
            result,
            Err(RelayMessageError::Assistant(AskAssistantError::OpenSession(_)))
        ));
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn completion_failure_uses_fallback() {
        let assistant = MockAssistantSession::new().with_reply("X");
        let completion =
            MockCompletionProvider::new().with_error(MockError::Timeout { timeout_secs: 5 });

        let exchange = relay(&assistant, &completion, true)
            .handle(command("hola"))
            .await
            .unwrap();

        assert_eq!(exchange.reply(), "X");
        assert_eq!(exchange.enrichment(), Some(FALLBACK));
    }
}
