//! HTTP DTOs for the relay endpoints.
//!
//! Field names follow the public JSON contract (`sessionId`, `watsonResponse`,
//! `gptResponse`), so request and response types rename to camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::MessageExchange;

// ════════════════════════════════════════════════════════════════════════════════
// Response Messages
// ════════════════════════════════════════════════════════════════════════════════

/// Body of a 500 from `/watson`.
pub const ASSISTANT_FAILURE_MESSAGE: &str = "Hubo un problema al procesar la solicitud en Watson.";

/// Body of a 500 from `/watson-to-gpt`.
pub const RELAY_FAILURE_MESSAGE: &str = "Hubo un problema al procesar la solicitud.";

/// Body of a 400 when a session id is required but absent.
pub const MISSING_SESSION_MESSAGE: &str = "Falta el identificador de sesión.";

/// Body of a 400 when the session id is present but unusable.
pub const INVALID_SESSION_MESSAGE: &str = "El identificador de sesión no es válido.";

/// Body of a 400 when `message` is blank.
pub const MISSING_MESSAGE_MESSAGE: &str = "El campo message es obligatorio.";

/// Body of a 400 when `prompt` is blank.
pub const MISSING_PROMPT_MESSAGE: &str = "El campo prompt es obligatorio.";

/// Body of a 400 when the request body is not the expected JSON.
pub const INVALID_BODY_MESSAGE: &str = "El cuerpo de la solicitud no es válido.";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to complete a prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Request carrying a message for the assistant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessageRequest {
    /// Caller-owned session id, used in caller-supplied mode.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Single-text response used by `/gpt` and `/watson`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextResponse {
    pub response: String,
}

impl TextResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Combined response of `/watson-to-gpt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub watson_response: String,
    /// Absent when enrichment is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt_response: Option<String>,
}

impl From<MessageExchange> for RelayResponse {
    fn from(exchange: MessageExchange) -> Self {
        let (watson_response, gpt_response) = exchange.into_parts();
        Self {
            watson_response,
            gpt_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_request_reads_camel_case_session_id() {
        let req: AssistantMessageRequest =
            serde_json::from_str(r#"{"sessionId": "s-1", "message": "hola"}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("s-1"));
        assert_eq!(req.message, "hola");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: AssistantMessageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.session_id, None);
        assert!(req.message.is_empty());

        let req: PromptRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
    }

    #[test]
    fn relay_response_uses_public_field_names() {
        let exchange = MessageExchange::new("hola", "X").with_enrichment("Y");
        let json = serde_json::to_value(RelayResponse::from(exchange)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"watsonResponse": "X", "gptResponse": "Y"})
        );
    }

    #[test]
    fn relay_response_omits_missing_enrichment() {
        let json = serde_json::to_value(RelayResponse::from(MessageExchange::new("hola", "X")))
            .unwrap();
        assert_eq!(json, serde_json::json!({"watsonResponse": "X"}));
    }
}
