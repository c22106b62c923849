//! Client for the users and API-key admin endpoints.
//!
//! Authorization is enforced server-side; this client only attaches the
//! configured API key. Record shapes are lenient: unknown fields are
//! ignored and missing ones take defaults.

mod api_keys;
mod users;


pub use api_keys::{ApiKeyRecord, CreateApiKey, CreatedApiKey, DEFAULT_RATE_LIMIT_RPM};
pub use users::{InviteUser, InvitedUser, UserRecord, UserRole};

use crate::transport::{EndpointConfig, HttpTransport};
use crate::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<AdminError> for nexus_common::NexusError {
    fn from(err: AdminError) -> Self {
        nexus_common::NexusError::Admin(err.to_string())
    }
}

/// Admin API client. Shares connection settings with the chat transport.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: HttpTransport,
}

impl AdminClient {
    pub fn new(config: EndpointConfig) -> Result<Self, AdminError> {
        Ok(Self {
            http: HttpTransport::new(config)?,
        })
    }

    /// Reuse an existing transport's client and credential.
    pub fn from_transport(http: HttpTransport) -> Self {
        Self { http }
    }
}
