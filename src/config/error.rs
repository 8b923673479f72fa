//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid URL for {field}: must start with http:// or https://")]
    InvalidUrl { field: &'static str },

    #[error("URL for {field} must use HTTPS in production")]
    UrlMustBeHttps { field: &'static str },

    #[error("max_tokens must be between 1 and {max}")]
    InvalidMaxTokens { max: u32 },

    #[error("Invalid timeout for {field}")]
    InvalidTimeout { field: &'static str },

    #[error("Upload directory cannot be empty")]
    EmptyUploadDirectory,

    #[error("Upload size limit must be greater than zero")]
    InvalidUploadLimit,
}
