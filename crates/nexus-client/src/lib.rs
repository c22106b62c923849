//! Client SDK for the NexusAI hosted service.
//!
//! Provides:
//! - An authenticated HTTP transport for the NEXUS chat endpoint
//! - A conversation `Session` that tracks turns and is safe to observe mid-flight
//! - Per-session usage (tokens and cost) tracking
//! - A client for the users and API-key admin endpoints

pub mod admin;
pub mod mode;
pub mod reply;
pub mod session;
pub mod transport;
pub mod usage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use admin::{AdminClient, AdminError};
pub use mode::ChatMode;
pub use reply::{ChatReply, ModelUsage};
pub use session::{ConcurrencyPolicy, DuplicatePolicy, Session, SessionOptions, SubmitError};
pub use transport::{Credential, EndpointConfig, HttpTransport};
pub use usage::UsageTracker;

/// One authenticated request/response exchange with the chat endpoint.
///
/// Implementations perform exactly one attempt per call. Retry policy, if
/// any, belongs to the caller.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, prompt: &str, mode: &ChatMode) -> Result<ChatReply, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. Never modified after it is appended.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

impl TransportError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Connection failures and timeouts.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }
}

impl From<TransportError> for nexus_common::NexusError {
    fn from(err: TransportError) -> Self {
        nexus_common::NexusError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_constructors_set_role() {
        assert_eq!(Turn::user("hi").role, Role::User);
        assert_eq!(Turn::assistant("").role, Role::Assistant);
        assert_eq!(Turn::assistant("").content, "");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn transport_error_classification() {
        let err = TransportError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "HTTP 500: boom");

        assert!(TransportError::Timeout.is_network());
        assert!(TransportError::Network("refused".into()).is_network());
        assert_eq!(TransportError::Timeout.status(), None);
    }

    #[test]
    fn transport_error_converts_to_nexus_error() {
        let err: nexus_common::NexusError = TransportError::Timeout.into();
        assert_eq!(err.to_string(), "network error: request timed out");
    }
}
