//! Watson Assistant - Implementation of AssistantSession for IBM Watson Assistant v2.
//!
//! # Endpoints
//!
//! - `POST {service_url}/v2/assistants/{assistant_id}/sessions` - open a session
//! - `POST {service_url}/v2/assistants/{assistant_id}/sessions/{session_id}/message` - send text
//! - `DELETE {service_url}/v2/assistants/{assistant_id}/sessions/{session_id}` - close a session
//!
//! Every call carries the `version` query parameter.
//!
//! # Authentication
//!
//! The API key is exchanged for a short-lived bearer token at the IBM Cloud IAM
//! endpoint. Tokens are cached and refreshed shortly before they expire.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::SessionHandle;
use crate::ports::{AssistantError, AssistantReply, AssistantSession, GenericItem};

/// IAM grant type for API key exchange.
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Refresh tokens this long before their advertised expiry.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Configuration for the Watson Assistant adapter.
#[derive(Debug, Clone)]
pub struct WatsonConfig {
    /// IBM Cloud API key.
    api_key: Secret<String>,
    /// Service instance URL.
    pub service_url: String,
    /// Assistant (environment) identifier.
    pub assistant_id: String,
    /// API version date.
    pub version: String,
    /// IAM token endpoint.
    pub iam_url: String,
    /// Request timeout. `None` leaves the client's default (no timeout).
    pub timeout: Option<Duration>,
}

impl WatsonConfig {
    /// Creates a new configuration.
    pub fn new(
        api_key: impl Into<String>,
        service_url: impl Into<String>,
        assistant_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            service_url: service_url.into(),
            assistant_id: assistant_id.into(),
            version: "2023-04-01".to_string(),
            iam_url: "https://iam.cloud.ibm.com/identity/token".to_string(),
            timeout: None,
        }
    }

    /// Sets the API version date.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the IAM token endpoint.
    pub fn with_iam_url(mut self, url: impl Into<String>) -> Self {
        self.iam_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// A bearer token obtained from IAM.
struct CachedToken {
    access_token: Secret<String>,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + ChronoDuration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Watson Assistant v2 adapter.
pub struct WatsonAssistant {
    config: WatsonConfig,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

impl WatsonAssistant {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: WatsonConfig) -> Result<Self, AssistantError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AssistantError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    fn sessions_url(&self) -> Result<Url, AssistantError> {
        let mut url = Url::parse(self.config.service_url.trim_end_matches('/')).map_err(|e| {
            AssistantError::network(format!(
                "Invalid service URL {}: {}",
                self.config.service_url, e
            ))
        })?;
        Self::push_segments(&mut url, &["v2", "assistants", &self.config.assistant_id, "sessions"])?;
        Ok(url)
    }

    /// Session ids are appended as single percent-encoded path segments.
    fn session_url(&self, session: &SessionHandle) -> Result<Url, AssistantError> {
        let mut url = self.sessions_url()?;
        Self::push_segments(&mut url, &[session.as_str()])?;
        Ok(url)
    }

    fn message_url(&self, session: &SessionHandle) -> Result<Url, AssistantError> {
        let mut url = self.session_url(session)?;
        Self::push_segments(&mut url, &["message"])?;
        Ok(url)
    }

    fn push_segments(url: &mut Url, segments: &[&str]) -> Result<(), AssistantError> {
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|_| AssistantError::network(format!("Service URL {} cannot be a base", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(())
    }

    /// Returns a valid bearer token, exchanging the API key when needed.
    async fn bearer_token(&self) -> Result<String, AssistantError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.expose_secret().clone());
            }
        }

        let fresh = self.request_token().await?;
        let value = fresh.access_token.expose_secret().clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken, AssistantError> {
        tracing::debug!("Requesting IAM access token");

        let response = self
            .client
            .post(&self.config.iam_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.config.api_key())])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "IAM token exchange failed");
            return Err(AssistantError::AuthenticationFailed(format!(
                "IAM returned {}: {}",
                status, body
            )));
        }

        let token: IamTokenResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse IAM token: {}", e)))?;

        Ok(CachedToken {
            access_token: Secret::new(token.access_token),
            expires_at: Utc::now() + ChronoDuration::seconds(token.expires_in),
        })
    }

    /// Attaches version and bearer token, then sends.
    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response, AssistantError> {
        let token = self.bearer_token().await?;

        request
            .query(&[("version", self.config.version.as_str())])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_timeout() {
            AssistantError::Timeout {
                timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if e.is_connect() {
            AssistantError::network(format!("Connection failed: {}", e))
        } else {
            AssistantError::network(e.to_string())
        }
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(
        response: Response,
        session: Option<&SessionHandle>,
    ) -> Result<Response, AssistantError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AssistantError::AuthenticationFailed(error_body)),
            404 => match session {
                Some(session) => Err(AssistantError::SessionNotFound(session.to_string())),
                None => Err(AssistantError::Api {
                    status: 404,
                    message: error_body,
                }),
            },
            500..=599 => Err(AssistantError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            code => Err(AssistantError::Api {
                status: code,
                message: error_body,
            }),
        }
    }
}

#[async_trait]
impl AssistantSession for WatsonAssistant {
    async fn open_session(&self) -> Result<SessionHandle, AssistantError> {
        let request = self.client.post(self.sessions_url()?);
        let response = self.send_authorized(request).await?;
        let response = Self::handle_response_status(response, None).await?;

        let created: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse session: {}", e)))?;

        SessionHandle::new(created.session_id)
            .map_err(|e| AssistantError::parse(format!("Backend returned {}", e)))
    }

    async fn send_message(
        &self,
        session: &SessionHandle,
        text: &str,
    ) -> Result<AssistantReply, AssistantError> {
        let body = MessageRequest {
            input: MessageInput {
                message_type: "text",
                text,
            },
        };
        let request = self.client.post(self.message_url(session)?).json(&body);
        let response = self.send_authorized(request).await?;
        let response = Self::handle_response_status(response, Some(session)).await?;

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse message reply: {}", e)))?;

        Ok(AssistantReply::new(
            message
                .output
                .generic
                .into_iter()
                .map(|item| GenericItem::new(item.response_type, item.text))
                .collect(),
        ))
    }

    async fn close_session(&self, session: &SessionHandle) -> Result<(), AssistantError> {
        let request = self.client.delete(self.session_url(session)?);
        let response = self.send_authorized(request).await?;
        Self::handle_response_status(response, Some(session)).await?;
        Ok(())
    }
}

// ----- Watson API Types -----

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session_id: String,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    input: MessageInput<'a>,
}

#[derive(Debug, Serialize)]
struct MessageInput<'a> {
    message_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    output: MessageOutput,
}

#[derive(Debug, Default, Deserialize)]
struct MessageOutput {
    #[serde(default)]
    generic: Vec<WatsonGenericItem>,
}

#[derive(Debug, Deserialize)]
struct WatsonGenericItem {
    response_type: String,
    text: Option<String>,
}
