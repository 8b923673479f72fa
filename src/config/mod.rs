//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `ASSISTANT_BRIDGE` prefix and nested
//! values are separated by double underscores.
//!
//! The unprefixed variables used by earlier deployments (`OPENAI_API_KEY`,
//! `IBM_API_KEY`, `IBM_SERVICE_URL`, `ASSISTANT_ID`, `PORT`) are still read as
//! defaults. A prefixed variable always wins over its legacy counterpart.
//!
//! # Example
//!
//! ```no_run
//! use assistant_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod assistant;
mod completion;
mod error;
mod pipeline;
mod server;
mod upload;

pub use assistant::AssistantConfig;
pub use completion::CompletionConfig;
pub use error::{ConfigError, ValidationError};
pub use pipeline::PipelineConfig;
pub use server::{Environment, ServerConfig};
pub use upload::UploadConfig;

use serde::Deserialize;

/// Environment variable prefix
const ENV_PREFIX: &str = "ASSISTANT_BRIDGE";

/// Legacy variable names and the configuration keys they feed.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "completion.api_key"),
    ("IBM_API_KEY", "assistant.api_key"),
    ("IBM_SERVICE_URL", "assistant.service_url"),
    ("ASSISTANT_ID", "assistant.assistant_id"),
    ("PORT", "server.port"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion provider configuration (OpenAI)
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Assistant configuration (Watson Assistant)
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Upload storage configuration
    #[serde(default)]
    pub upload: UploadConfig,

    /// Relay pipeline switches
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from the legacy unprefixed variables
    /// 3. Reads environment variables with `ASSISTANT_BRIDGE` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_BRIDGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ASSISTANT_BRIDGE__PIPELINE__ENRICH=false` -> `pipeline.enrich = false`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in LEGACY_ENV_KEYS {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Credentials for both upstream services are required. Upstream URLs
    /// must use HTTPS in production.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let production = self.is_production();
        self.server.validate()?;
        self.completion.validate(production)?;
        self.assistant.validate(production)?;
        self.upload.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

/// Check that `url` is an absolute http(s) URL, HTTPS only in production.
pub(crate) fn validate_url(
    url: &str,
    field: &'static str,
    production: bool,
) -> Result<(), ValidationError> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if url.starts_with("http://") {
        if production {
            return Err(ValidationError::UrlMustBeHttps { field });
        }
        return Ok(());
    }
    Err(ValidationError::InvalidUrl { field })
}
