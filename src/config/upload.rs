//! Upload storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory receiving uploaded files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl UploadConfig {
    /// Validate upload configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::EmptyUploadDirectory);
        }
        if self.max_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_config_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.directory, PathBuf::from("uploads"));
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_values() {
        let config = UploadConfig {
            directory: PathBuf::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyUploadDirectory));

        let config = UploadConfig {
            max_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUploadLimit));
    }
}
