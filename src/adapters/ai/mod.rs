//! Completion Provider Adapters.
//!
//! Implementations of the CompletionProvider port.
//!
//! ## Available Adapters
//!
//! - `MockCompletionProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI text completions API

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockCompletionProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
