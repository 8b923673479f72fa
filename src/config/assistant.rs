//! Conversational assistant configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::validate_url;

/// Conversational assistant configuration (IBM Watson Assistant v2)
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// IBM Cloud API key
    pub api_key: Option<String>,

    /// Service instance URL
    pub service_url: Option<String>,

    /// Assistant identifier
    pub assistant_id: Option<String>,

    /// API version date
    #[serde(default = "default_version")]
    pub version: String,

    /// IAM token endpoint
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// Request timeout in seconds; unset means no timeout
    pub timeout_secs: Option<u64>,
}

impl AssistantConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if is_blank(&self.api_key) {
            return Err(ValidationError::MissingRequired("ASSISTANT__API_KEY"));
        }
        if is_blank(&self.assistant_id) {
            return Err(ValidationError::MissingRequired("ASSISTANT__ASSISTANT_ID"));
        }
        match self.service_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                validate_url(url, "assistant.service_url", production)?
            }
            _ => return Err(ValidationError::MissingRequired("ASSISTANT__SERVICE_URL")),
        }
        validate_url(&self.iam_url, "assistant.iam_url", production)?;
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout {
                field: "assistant.timeout_secs",
            });
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            service_url: None,
            assistant_id: None,
            version: default_version(),
            iam_url: default_iam_url(),
            timeout_secs: None,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn default_version() -> String {
    "2023-04-01".to_string()
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}
