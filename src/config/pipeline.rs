//! Relay pipeline switches

use serde::Deserialize;

use crate::domain::SessionMode;

/// Relay pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Who owns the assistant session lifecycle
    #[serde(default)]
    pub session_mode: SessionMode,

    /// Feed assistant replies into the completion model
    #[serde(default = "default_enrich")]
    pub enrich: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            session_mode: SessionMode::default(),
            enrich: default_enrich(),
        }
    }
}

fn default_enrich() -> bool {
    true
}
