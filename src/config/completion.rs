//! Completion provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::validate_url;

/// Upper bound accepted for `max_tokens`.
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// Text-completion provider configuration (OpenAI)
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// OpenAI API key
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// Tokens to generate per enrichment
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Text returned in place of a completion when the provider fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Request timeout in seconds; unset means no timeout
    pub timeout_secs: Option<u64>,
}

impl CompletionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate completion configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("COMPLETION__API_KEY"));
        }
        validate_url(&self.base_url, "completion.base_url", production)?;
        if self.max_tokens == 0 || self.max_tokens > MAX_COMPLETION_TOKENS {
            return Err(ValidationError::InvalidMaxTokens {
                max: MAX_COMPLETION_TOKENS,
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout {
                field: "completion.timeout_secs",
            });
        }
        Ok(())
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            fallback_message: default_fallback_message(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_fallback_message() -> String {
    "Lo siento, hubo un problema al obtener la respuesta de GPT.".to_string()
}
