//! Conversation session management.
//!
//! A `Session` holds the ordered, append-only turn history of one
//! conversation and orchestrates each submission: the user turn is
//! appended before the request goes out, the assistant turn after it
//! succeeds. Observers can read or subscribe to the history at any time.

mod chat;
mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::Session;
pub use types::{ConcurrencyPolicy, DuplicatePolicy, SessionOptions, SubmitError};
