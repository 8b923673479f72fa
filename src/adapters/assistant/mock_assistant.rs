//! Mock Assistant Session for testing.
//!
//! Configurable implementation of the AssistantSession port. Each operation
//! has its own queue of outcomes; when a queue is empty the operation succeeds
//! with a default. Every call is recorded so tests can assert on session
//! lifecycle (opened, messaged, closed).

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::SessionHandle;
use crate::ports::{AssistantError, AssistantReply, AssistantSession, GenericItem};

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockAssistantError {
    /// Simulate credential failure.
    AuthenticationFailed,
    /// Simulate an expired session.
    SessionNotFound,
    /// Simulate backend unavailable.
    Unavailable { message: String },
    /// Simulate network error.
    Network { message: String },
}

impl MockAssistantError {
    fn into_error(self, session: Option<&SessionHandle>) -> AssistantError {
        match self {
            MockAssistantError::AuthenticationFailed => {
                AssistantError::AuthenticationFailed("mock".to_string())
            }
            MockAssistantError::SessionNotFound => AssistantError::SessionNotFound(
                session.map(ToString::to_string).unwrap_or_default(),
            ),
            MockAssistantError::Unavailable { message } => AssistantError::unavailable(message),
            MockAssistantError::Network { message } => AssistantError::network(message),
        }
    }
}

#[derive(Debug, Default)]
struct Outcomes {
    open: VecDeque<MockAssistantError>,
    send: VecDeque<Result<AssistantReply, MockAssistantError>>,
    close: VecDeque<MockAssistantError>,
}

#[derive(Debug, Default)]
struct Calls {
    opened: Vec<SessionHandle>,
    sent: Vec<(SessionHandle, String)>,
    closed: Vec<SessionHandle>,
    closes_completed: usize,
}

/// Mock assistant backend for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAssistantSession {
    outcomes: Arc<Mutex<Outcomes>>,
    calls: Arc<Mutex<Calls>>,
    delay: Duration,
    close_delay: Duration,
}

impl MockAssistantSession {
    /// Creates a mock whose operations all succeed with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a single-text reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.with_reply_items(vec![GenericItem::text(text)])
    }

    /// Queues a reply with the given generic items.
    pub fn with_reply_items(self, items: Vec<GenericItem>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .send
            .push_back(Ok(AssistantReply::new(items)));
        self
    }

    /// Queues a reply with no generic items.
    pub fn with_empty_reply(self) -> Self {
        self.with_reply_items(Vec::new())
    }

    /// Queues a failure for the next send.
    pub fn with_send_error(self, error: MockAssistantError) -> Self {
        self.outcomes.lock().unwrap().send.push_back(Err(error));
        self
    }

    /// Queues a failure for the next open.
    pub fn with_open_error(self, error: MockAssistantError) -> Self {
        self.outcomes.lock().unwrap().open.push_back(error);
        self
    }

    /// Queues a failure for the next close.
    pub fn with_close_error(self, error: MockAssistantError) -> Self {
        self.outcomes.lock().unwrap().close.push_back(error);
        self
    }

    /// Sets simulated latency for message sends.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets simulated latency for session closes.
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Sessions opened so far.
    pub fn opened(&self) -> Vec<SessionHandle> {
        self.calls.lock().unwrap().opened.clone()
    }

    /// Messages sent so far, with the session they were sent in.
    pub fn sent(&self) -> Vec<(SessionHandle, String)> {
        self.calls.lock().unwrap().sent.clone()
    }

    /// Close attempts so far, including failed ones.
    pub fn closed(&self) -> Vec<SessionHandle> {
        self.calls.lock().unwrap().closed.clone()
    }

    /// Close calls that ran to completion, successful or not.
    pub fn closes_completed(&self) -> usize {
        self.calls.lock().unwrap().closes_completed
    }

    /// Total number of backend calls of any kind.
    pub fn call_count(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.opened.len() + calls.sent.len() + calls.closed.len()
    }
}

#[async_trait]
impl AssistantSession for MockAssistantSession {
    async fn open_session(&self) -> Result<SessionHandle, AssistantError> {
        if let Some(error) = self.outcomes.lock().unwrap().open.pop_front() {
            return Err(error.into_error(None));
        }

        let handle = SessionHandle::new(format!("mock-{}", Uuid::new_v4()))
            .map_err(|e| AssistantError::parse(e.to_string()))?;
        self.calls.lock().unwrap().opened.push(handle.clone());
        Ok(handle)
    }

    async fn send_message(
        &self,
        session: &SessionHandle,
        text: &str,
    ) -> Result<AssistantReply, AssistantError> {
        self.calls
            .lock()
            .unwrap()
            .sent
            .push((session.clone(), text.to_string()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = self.outcomes.lock().unwrap().send.pop_front();
        match outcome {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(error)) => Err(error.into_error(Some(session))),
            None => Ok(AssistantReply::text("Mock reply")),
        }
    }

    async fn close_session(&self, session: &SessionHandle) -> Result<(), AssistantError> {
        self.calls.lock().unwrap().closed.push(session.clone());

        if !self.close_delay.is_zero() {
            sleep(self.close_delay).await;
        }

        let outcome = self.outcomes.lock().unwrap().close.pop_front();
        self.calls.lock().unwrap().closes_completed += 1;
        match outcome {
            Some(error) => Err(error.into_error(Some(session))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_assistant_tracks_lifecycle() {
        let assistant = MockAssistantSession::new().with_reply("Hi there");

        let session = assistant.open_session().await.unwrap();
        let reply = assistant.send_message(&session, "hello").await.unwrap();
        assistant.close_session(&session).await.unwrap();

        assert_eq!(reply.primary_text(), Some("Hi there"));
        assert_eq!(assistant.opened(), vec![session.clone()]);
        assert_eq!(assistant.sent(), vec![(session.clone(), "hello".to_string())]);
        assert_eq!(assistant.closed(), vec![session]);
        assert_eq!(assistant.call_count(), 3);
    }

    #[tokio::test]
    async fn mock_assistant_issues_distinct_sessions() {
        let assistant = MockAssistantSession::new();

        let first = assistant.open_session().await.unwrap();
        let second = assistant.open_session().await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn mock_assistant_injects_errors_per_operation() {
        let assistant = MockAssistantSession::new()
            .with_open_error(MockAssistantError::AuthenticationFailed)
            .with_send_error(MockAssistantError::SessionNotFound)
            .with_close_error(MockAssistantError::Unavailable {
                message: "down".to_string(),
            });
        let session = SessionHandle::new("s1").unwrap();

        assert!(matches!(
            assistant.open_session().await,
            Err(AssistantError::AuthenticationFailed(_))
        ));
        assert_eq!(
            assistant.send_message(&session, "x").await,
            Err(AssistantError::SessionNotFound("s1".to_string()))
        );
        assert!(matches!(
            assistant.close_session(&session).await,
            Err(AssistantError::Unavailable { .. })
        ));
        assert!(assistant.opened().is_empty());
    }

    #[tokio::test]
    async fn mock_assistant_defaults_to_text_reply() {
        let assistant = MockAssistantSession::new();
        let session = SessionHandle::new("s1").unwrap();

        let reply = assistant.send_message(&session, "x").await.unwrap();

        assert_eq!(reply.primary_text(), Some("Mock reply"));
    }
}
