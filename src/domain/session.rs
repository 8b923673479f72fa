//! Assistant session value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;

/// Opaque identifier of a conversation session held by the assistant backend.
///
/// The backend decides the format. This type only guarantees the id is not
/// blank and is not a `.` or `..` path segment, since it is placed in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(String);

impl SessionHandle {
    /// Creates a handle from a backend-issued id.
    ///
    /// Surrounding whitespace is trimmed. Blank ids and dot segments are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(ValidationError::invalid_format(
                "session_id",
                "must not be a dot segment",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as sent to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who owns the assistant session lifecycle for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    /// The caller sends a session id it opened itself; it is never closed here.
    #[default]
    CallerSupplied,
    /// A session is opened for each request and closed before the request completes.
    AdapterManaged,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::CallerSupplied => f.write_str("caller-supplied"),
            SessionMode::AdapterManaged => f.write_str("adapter-managed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_handle_trims_whitespace() {
        let handle = SessionHandle::new("  abc-123 \n").unwrap();
        assert_eq!(handle.as_str(), "abc-123");
        assert_eq!(handle.to_string(), "abc-123");
    }

    #[test]
    fn session_handle_rejects_blank_ids() {
        assert!(SessionHandle::new("").is_err());
        assert!(SessionHandle::new("   ").is_err());
    }

    #[test]
    fn session_handle_rejects_dot_segments() {
        assert!(matches!(
            SessionHandle::new(".."),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            SessionHandle::new(" . "),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(SessionHandle::new("..a").is_ok());
    }

    #[test]
    fn session_handle_serializes_transparently() {
        let handle = SessionHandle::new("sess-1").unwrap();
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"sess-1\"");
    }

    #[test]
    fn session_mode_uses_kebab_case() {
        let mode: SessionMode = serde_json::from_str("\"adapter-managed\"").unwrap();
        assert_eq!(mode, SessionMode::AdapterManaged);

        let json = serde_json::to_string(&SessionMode::CallerSupplied).unwrap();
        assert_eq!(json, "\"caller-supplied\"");
    }

    #[test]
    fn session_mode_defaults_to_caller_supplied() {
        assert_eq!(SessionMode::default(), SessionMode::CallerSupplied);
        assert_eq!(SessionMode::AdapterManaged.to_string(), "adapter-managed");
    }
}
