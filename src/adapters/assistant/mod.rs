//! Assistant Session Adapters.
//!
//! - `WatsonAssistant` - IBM Watson Assistant v2 REST API
//! - `MockAssistantSession` - Configurable mock for testing

mod mock_assistant;
mod watson_assistant;

pub use mock_assistant::{MockAssistantError, MockAssistantSession};
pub use watson_assistant::{WatsonAssistant, WatsonConfig};
