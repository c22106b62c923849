//! HTTP transport for the NexusAI API.
//!
//! Performs one authenticated request/response exchange per call against
//! the configured base URL. No retries, no caching.

mod api;
mod client;
mod config;


pub use client::{HttpTransport, CHAT_PATH};
pub use config::{Credential, EndpointConfig};
