//! Types shared by every NexusAI console crate.

pub mod errors;
pub mod id;

pub use errors::{ConfigError, NexusError};
pub use id::{new_correlation_id, ConversationId};

pub type Result<T> = std::result::Result<T, NexusError>;
