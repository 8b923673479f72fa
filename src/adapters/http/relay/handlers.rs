//! HTTP handlers for the relay endpoints.
//!
//! These handlers connect Axum routes to the assistant, completion and relay
//! command handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    AskAssistantCommand, AskAssistantError, AskAssistantHandler, CompletePromptCommand,
    CompletePromptHandler, RelayMessageCommand, RelayMessageError, RelayMessageHandler,
};
use crate::domain::SessionMode;
use crate::ports::{AssistantSession, CompletionProvider};

use super::dto::{
    AssistantMessageRequest, PromptRequest, RelayResponse, TextResponse,
    ASSISTANT_FAILURE_MESSAGE, INVALID_BODY_MESSAGE, INVALID_SESSION_MESSAGE,
    MISSING_MESSAGE_MESSAGE, MISSING_PROMPT_MESSAGE, MISSING_SESSION_MESSAGE,
    RELAY_FAILURE_MESSAGE,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Pipeline switches fixed at startup.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub session_mode: SessionMode,
    pub enrich: bool,
    pub fallback_message: String,
}

/// Shared state for the relay endpoints.
///
/// Cloned per request; adapters are shared behind `Arc`.
#[derive(Clone)]
pub struct RelayAppState {
    pub assistant: Arc<dyn AssistantSession>,
    pub completion: Arc<dyn CompletionProvider>,
    pub settings: RelaySettings,
}

impl RelayAppState {
    pub fn ask_assistant_handler(&self) -> AskAssistantHandler {
        AskAssistantHandler::new(self.assistant.clone(), self.settings.session_mode)
    }

    pub fn complete_prompt_handler(&self) -> CompletePromptHandler {
        CompletePromptHandler::new(
            self.completion.clone(),
            self.settings.fallback_message.clone(),
        )
    }

    pub fn relay_message_handler(&self) -> RelayMessageHandler {
        RelayMessageHandler::new(
            Arc::new(self.ask_assistant_handler()),
            Arc::new(self.complete_prompt_handler()),
            self.settings.enrich,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /gpt - Complete a prompt
pub async fn complete_prompt(
    State(state): State<RelayAppState>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(req) = body.map_err(RelayApiError::invalid_body)?;
    if req.prompt.trim().is_empty() {
        return Err(RelayApiError::BadRequest(MISSING_PROMPT_MESSAGE));
    }

    let result = state
        .complete_prompt_handler()
        .handle(CompletePromptCommand::new(req.prompt))
        .await;

    Ok(Json(TextResponse::new(result.text)))
}

/// POST /watson - Ask the assistant
pub async fn ask_assistant(
    State(state): State<RelayAppState>,
    body: Result<Json<AssistantMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(req) = body.map_err(RelayApiError::invalid_body)?;
    if req.message.trim().is_empty() {
        return Err(RelayApiError::BadRequest(MISSING_MESSAGE_MESSAGE));
    }

    let cmd = AskAssistantCommand {
        session_id: req.session_id,
        message: req.message,
    };
    let result = state
        .ask_assistant_handler()
        .handle(cmd)
        .await
        .map_err(|e| RelayApiError::from_assistant(e, ASSISTANT_FAILURE_MESSAGE))?;

    Ok(Json(TextResponse::new(result.reply)))
}

/// POST /watson-to-gpt - Ask the assistant and enrich its reply
pub async fn relay_message(
    State(state): State<RelayAppState>,
    body: Result<Json<AssistantMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(req) = body.map_err(RelayApiError::invalid_body)?;
    if req.message.trim().is_empty() {
        return Err(RelayApiError::BadRequest(MISSING_MESSAGE_MESSAGE));
    }

    let cmd = RelayMessageCommand {
        session_id: req.session_id,
        message: req.message,
    };
    let exchange = state
        .relay_message_handler()
        .handle(cmd)
        .await
        .map_err(|RelayMessageError::Assistant(e)| {
            RelayApiError::from_assistant(e, RELAY_FAILURE_MESSAGE)
        })?;

    Ok(Json(RelayResponse::from(exchange)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error rendered as a plain-text body.
///
/// Error details are logged by the application layer and never sent to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayApiError {
    BadRequest(&'static str),
    Internal(&'static str),
}

impl RelayApiError {
    fn invalid_body(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::BadRequest(INVALID_BODY_MESSAGE)
    }

    fn from_assistant(err: AskAssistantError, failure_message: &'static str) -> Self {
        match err {
            AskAssistantError::MissingSessionId => Self::BadRequest(MISSING_SESSION_MESSAGE),
            AskAssistantError::InvalidSessionId(_) => Self::BadRequest(INVALID_SESSION_MESSAGE),
            AskAssistantError::OpenSession(_)
            | AskAssistantError::SendMessage(_)
            | AskAssistantError::EmptyReply => Self::Internal(failure_message),
        }
    }
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> Response {
        match self {
            RelayApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            RelayApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AssistantError;

    #[test]
    fn missing_session_maps_to_bad_request() {
        let err = RelayApiError::from_assistant(
            AskAssistantError::MissingSessionId,
            RELAY_FAILURE_MESSAGE,
        );
        assert_eq!(err, RelayApiError::BadRequest(MISSING_SESSION_MESSAGE));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_failures_map_to_fixed_message() {
        let errors = vec![
            AskAssistantError::OpenSession(AssistantError::network("reset")),
            AskAssistantError::SendMessage(AssistantError::unavailable("down")),
            AskAssistantError::EmptyReply,
        ];
        for err in errors {
            let api = RelayApiError::from_assistant(err, ASSISTANT_FAILURE_MESSAGE);
            assert_eq!(api, RelayApiError::Internal(ASSISTANT_FAILURE_MESSAGE));
        }
    }
}
