//! AskAssistantHandler - Sends one message to the assistant and extracts the reply.
//!
//! In adapter-managed mode a session is opened for the request and closed
//! before the handler returns, whatever the outcome of the exchange. In
//! caller-supplied mode the caller's session id is used as-is and the session
//! lifecycle is left to the caller.

use std::sync::Arc;
use thiserror::Error;

use crate::application::SessionScope;
use crate::domain::{SessionHandle, SessionMode, ValidationError};
use crate::ports::{AssistantError, AssistantSession};

/// Command to ask the assistant.
#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    /// Session to send in. Required in caller-supplied mode, ignored otherwise.
    pub session_id: Option<String>,
    pub message: String,
}

impl AskAssistantCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            session_id: None,
            message: message.into(),
        }
    }

    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskAssistantResult {
    pub reply: String,
    pub session: SessionHandle,
}

/// Errors that can occur while asking the assistant.
#[derive(Debug, Clone, Error)]
pub enum AskAssistantError {
    #[error("Session id is required")]
    MissingSessionId,

    #[error("Invalid session id: {0}")]
    InvalidSessionId(#[source] ValidationError),

    #[error("Failed to open assistant session: {0}")]
    OpenSession(#[source] AssistantError),

    #[error("Failed to send message to assistant: {0}")]
    SendMessage(#[source] AssistantError),

    #[error("Assistant reply contained no text")]
    EmptyReply,
}

/// Handler for assistant exchanges.
pub struct AskAssistantHandler {
    assistant: Arc<dyn AssistantSession>,
    mode: SessionMode,
}

impl AskAssistantHandler {
    pub fn new(assistant: Arc<dyn AssistantSession>, mode: SessionMode) -> Self {
        Self { assistant, mode }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub async fn handle(
        &self,
        cmd: AskAssistantCommand,
    ) -> Result<AskAssistantResult, AskAssistantError> {
        match self.mode {
            SessionMode::CallerSupplied => self.ask_in_caller_session(cmd).await,
            SessionMode::AdapterManaged => self.ask_in_scoped_session(cmd).await,
        }
    }

    async fn ask_in_caller_session(
        &self,
        cmd: AskAssistantCommand,
    ) -> Result<AskAssistantResult, AskAssistantError> {
        let id = cmd
            .session_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(AskAssistantError::MissingSessionId)?;
        let session = SessionHandle::new(id).map_err(AskAssistantError::InvalidSessionId)?;

        let reply = self.exchange(&session, &cmd.message).await?;
        Ok(AskAssistantResult { reply, session })
    }

    async fn ask_in_scoped_session(
        &self,
        cmd: AskAssistantCommand,
    ) -> Result<AskAssistantResult, AskAssistantError> {
        if let Some(id) = &cmd.session_id {
            tracing::debug!(session_id = %id, "Ignoring caller session id in adapter-managed mode");
        }

        let scope = SessionScope::open(Arc::clone(&self.assistant))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to open assistant session");
                AskAssistantError::OpenSession(e)
            })?;

        let outcome = self.exchange(scope.handle(), &cmd.message).await;
        let session = scope.handle().clone();

        if let Err(e) = scope.close().await {
            tracing::warn!(session_id = %session, error = %e, "Failed to close assistant session");
        }

        let reply = outcome?;
        Ok(AskAssistantResult { reply, session })
    }

    async fn exchange(
        &self,
        session: &SessionHandle,
        message: &str,
    ) -> Result<String, AskAssistantError> {
        let reply = self
            .assistant
            .send_message(session, message)
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session, error = %e, "Assistant message failed");
                AskAssistantError::SendMessage(e)
            })?;

        match reply.primary_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::warn!(
                    session_id = %session,
                    items = reply.generic.len(),
                    "Assistant reply contained no text item"
                );
                Err(AskAssistantError::EmptyReply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::assistant::{MockAssistantError, MockAssistantSession};
    use crate::ports::GenericItem;

    fn managed(mock: &MockAssistantSession) -> AskAssistantHandler {
        AskAssistantHandler::new(Arc::new(mock.clone()), SessionMode::AdapterManaged)
    }

    fn caller(mock: &MockAssistantSession) -> AskAssistantHandler {
        AskAssistantHandler::new(Arc::new(mock.clone()), SessionMode::CallerSupplied)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Adapter-managed mode
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn managed_returns_first_text_and_closes_once() {
        let mock = MockAssistantSession::new().with_reply("X");

        let result = managed(&mock)
            .handle(AskAssistantCommand::new("hola"))
            .await
            .unwrap();

        assert_eq!(result.reply, "X");
        assert_eq!(mock.opened(), vec![result.session.clone()]);
        assert_eq!(mock.sent(), vec![(result.session.clone(), "hola".to_string())]);
        assert_eq!(mock.closed(), vec![result.session]);
    }

    #[tokio::test]
    async fn managed_closes_after_send_failure() {
        let mock = MockAssistantSession::new().with_send_error(MockAssistantError::Unavailable {
            message: "down".to_string(),
        });

        let result = managed(&mock).handle(AskAssistantCommand::new("hola")).await;

        assert!(matches!(
            result,
            Err(AskAssistantError::SendMessage(AssistantError::Unavailable { .. }))
        ));
        assert_eq!(mock.opened().len(), 1);
        assert_eq!(mock.closed(), mock.opened());
    }

    #[tokio::test]
    async fn managed_closes_after_empty_reply() {
        let mock = MockAssistantSession::new().with_empty_reply();

        let result = managed(&mock).handle(AskAssistantCommand::new("hola")).await;

        assert!(matches!(result, Err(AskAssistantError::EmptyReply)));
        assert_eq!(mock.closed(), mock.opened());
    }

    #[tokio::test]
    async fn managed_open_failure_skips_send_and_close() {
        let mock =
            MockAssistantSession::new().with_open_error(MockAssistantError::AuthenticationFailed);

        let result = managed(&mock).handle(AskAssistantCommand::new("hola")).await;

        assert!(matches!(result, Err(AskAssistantError::OpenSession(_))));
        assert!(mock.sent().is_empty());
        assert!(mock.closed().is_empty());
    }

    #[tokio::test]
    async fn managed_close_failure_keeps_reply() {
        let mock = MockAssistantSession::new()
            .with_reply("X")
            .with_close_error(MockAssistantError::Network {
                message: "reset".to_string(),
            });

        let result = managed(&mock)
            .handle(AskAssistantCommand::new("hola"))
            .await
            .unwrap();

        assert_eq!(result.reply, "X");
        assert_eq!(mock.closed().len(), 1);
    }

    #[tokio::test]
    async fn managed_ignores_caller_session_id() {
        let mock = MockAssistantSession::new();

        let result = managed(&mock)
            .handle(AskAssistantCommand::new("hola").in_session("caller-1"))
            .await
            .unwrap();

        assert_ne!(result.session.as_str(), "caller-1");
        assert_eq!(mock.opened().len(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Caller-supplied mode
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn caller_mode_sends_in_given_session_without_lifecycle_calls() {
        let mock = MockAssistantSession::new().with_reply("X");

        let result = caller(&mock)
            .handle(AskAssistantCommand::new("hola").in_session("caller-1"))
            .await
            .unwrap();

        assert_eq!(result.reply, "X");
        assert_eq!(result.session.as_str(), "caller-1");
        assert!(mock.opened().is_empty());
        assert!(mock.closed().is_empty());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn caller_mode_requires_session_id() {
        let mock = MockAssistantSession::new();

        let missing = caller(&mock).handle(AskAssistantCommand::new("hola")).await;
        let blank = caller(&mock)
            .handle(AskAssistantCommand::new("hola").in_session("   "))
            .await;

        assert!(matches!(missing, Err(AskAssistantError::MissingSessionId)));
        assert!(matches!(blank, Err(AskAssistantError::MissingSessionId)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn caller_mode_rejects_dot_segment_session_id() {
        let mock = MockAssistantSession::new();

        let result = caller(&mock)
            .handle(AskAssistantCommand::new("hola").in_session(".."))
            .await;

        assert!(matches!(result, Err(AskAssistantError::InvalidSessionId(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn caller_mode_empty_reply_is_typed_error() {
        let mock = MockAssistantSession::new().with_empty_reply();

        let result = caller(&mock)
            .handle(AskAssistantCommand::new("hola").in_session("caller-1"))
            .await;

        assert!(matches!(result, Err(AskAssistantError::EmptyReply)));
        assert!(mock.closed().is_empty());
    }

    #[tokio::test]
    async fn reply_uses_first_text_item() {
        let mock = MockAssistantSession::new().with_reply_items(vec![
            GenericItem::new("option", None),
            GenericItem::text("first"),
            GenericItem::text("second"),
        ]);

        let result = caller(&mock)
            .handle(AskAssistantCommand::new("hola").in_session("caller-1"))
            .await
            .unwrap();

        assert_eq!(result.reply, "first");
    }
}
