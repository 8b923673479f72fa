//! Assistant Session Port - Interface for stateful conversational backends.
//!
//! A conversational assistant keeps per-session context on its side. This port
//! exposes the three operations the relay needs: open a session, send one
//! user message within it, and close it.
//!
//! Adapters must not retry on their own; callers decide how failures surface.

use async_trait::async_trait;

use crate::domain::SessionHandle;

/// Port for conversational assistant backends.
#[async_trait]
pub trait AssistantSession: Send + Sync {
    /// Opens a new backend session.
    async fn open_session(&self) -> Result<SessionHandle, AssistantError>;

    /// Sends one text message within a session and returns the backend's reply items.
    async fn send_message(
        &self,
        session: &SessionHandle,
        text: &str,
    ) -> Result<AssistantReply, AssistantError>;

    /// Releases a backend session.
    async fn close_session(&self, session: &SessionHandle) -> Result<(), AssistantError>;
}

/// Response type of a generic item carrying plain text.
pub const TEXT_RESPONSE_TYPE: &str = "text";

/// The backend's reply to one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantReply {
    /// Generic output items, in backend order.
    pub generic: Vec<GenericItem>,
}

impl AssistantReply {
    pub fn new(generic: Vec<GenericItem>) -> Self {
        Self { generic }
    }

    /// Creates a reply with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![GenericItem::text(text)])
    }

    /// Returns the first text item, which is the primary reply.
    pub fn primary_text(&self) -> Option<&str> {
        self.generic.iter().find_map(GenericItem::as_text)
    }

    pub fn is_empty(&self) -> bool {
        self.generic.is_empty()
    }
}

/// One unit of reply content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericItem {
    /// Backend content type, e.g. "text", "option", "image".
    pub response_type: String,
    /// Text content, when the item carries any.
    pub text: Option<String>,
}

impl GenericItem {
    pub fn new(response_type: impl Into<String>, text: Option<String>) -> Self {
        Self {
            response_type: response_type.into(),
            text,
        }
    }

    /// Creates a text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TEXT_RESPONSE_TYPE, Some(text.into()))
    }

    /// Returns the text when this is a text item.
    pub fn as_text(&self) -> Option<&str> {
        if self.response_type == TEXT_RESPONSE_TYPE {
            self.text.as_deref()
        } else {
            None
        }
    }
}

/// Assistant backend errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// Credential exchange or API authentication failed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The backend does not know the session (expired or never existed).
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Backend is unavailable.
    #[error("assistant unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Backend returned an unexpected status.
    #[error("assistant API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or summary.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl AssistantError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_text_is_first_text_item() {
        let reply = AssistantReply::new(vec![
            GenericItem::new("image", None),
            GenericItem::text("first"),
            GenericItem::text("second"),
        ]);

        assert_eq!(reply.primary_text(), Some("first"));
    }

    #[test]
    fn primary_text_is_none_without_text_items() {
        assert_eq!(AssistantReply::default().primary_text(), None);

        let reply = AssistantReply::new(vec![GenericItem::new("option", None)]);
        assert_eq!(reply.primary_text(), None);
        assert!(!reply.is_empty());
    }

    #[test]
    fn non_text_items_never_yield_text() {
        let item = GenericItem::new("suggestion", Some("ignored".to_string()));
        assert_eq!(item.as_text(), None);
    }

    #[test]
    fn assistant_error_displays_correctly() {
        let err = AssistantError::Api {
            status: 409,
            message: "conflict".to_string(),
        };
        assert_eq!(err.to_string(), "assistant API error 409: conflict");
        assert_eq!(
            AssistantError::SessionNotFound("abc".to_string()).to_string(),
            "session not found: abc"
        );
    }
}
