//! Assistant Bridge - conversational assistant relay service
//!
//! This crate relays user messages to a conversational assistant backend,
//! optionally enriches the assistant's reply with a text-completion model, and
//! accepts CSV uploads for local storage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
pub mod telemetry;
