//! SessionScope - owns one assistant session for the length of a request.
//!
//! A scope is acquired by opening a session and released by [`SessionScope::close`].
//! A scope dropped while still open (early return, unwinding, a cancelled request
//! future) hands the close call to the current Tokio runtime, so every session
//! opened here is closed exactly once.

use std::sync::Arc;

use crate::domain::SessionHandle;
use crate::ports::{AssistantError, AssistantSession};

pub struct SessionScope {
    assistant: Arc<dyn AssistantSession>,
    handle: SessionHandle,
    closed: bool,
}

impl SessionScope {
    /// Opens a new session on `assistant`.
    pub async fn open(assistant: Arc<dyn AssistantSession>) -> Result<Self, AssistantError> {
        let handle = assistant.open_session().await?;
        tracing::debug!(session_id = %handle, "Assistant session opened");
        Ok(Self {
            assistant,
            handle,
            closed: false,
        })
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Closes the session, consuming the scope.
    ///
    /// The close call runs on its own task, so it completes even if the
    /// caller is cancelled while awaiting it.
    pub async fn close(mut self) -> Result<(), AssistantError> {
        self.closed = true;
        let assistant = Arc::clone(&self.assistant);
        let handle = self.handle.clone();

        let task = tokio::spawn(async move {
            let result = assistant.close_session(&handle).await;
            if result.is_ok() {
                tracing::debug!(session_id = %handle, "Assistant session closed");
            }
            result
        });

        task.await.map_err(|e| {
            AssistantError::unavailable(format!(
                "Close task for session {} failed: {}",
                self.handle, e
            ))
        })?
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let assistant = Arc::clone(&self.assistant);
        let handle = self.handle.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                tracing::debug!(session_id = %handle, "Closing abandoned assistant session");
                runtime.spawn(async move {
                    if let Err(e) = assistant.close_session(&handle).await {
                        tracing::warn!(
                            session_id = %handle,
                            error = %e,
                            "Failed to close abandoned assistant session"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %handle,
                    "No runtime available, assistant session left open"
                );
            }
        }
    }
}
