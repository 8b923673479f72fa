//! Domain layer containing the relay's value types.
//!
//! # Module Organization
//!
//! - `session` - Assistant session handle and session ownership mode
//! - `exchange` - Per-request message exchange record
//! - `errors` - Value object validation errors

pub mod errors;
pub mod exchange;
pub mod session;

pub use errors::ValidationError;
pub use exchange::MessageExchange;
pub use session::{SessionHandle, SessionMode};
