//! API key management.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AdminClient, AdminError};

const API_KEYS_PATH: &str = "/api/v1/api-keys";

pub const DEFAULT_RATE_LIMIT_RPM: u32 = 60;

/// Body of `POST /api/v1/api-keys`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApiKey {
    pub name: String,
    pub rate_limit_rpm: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

impl CreateApiKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate_limit_rpm: DEFAULT_RATE_LIMIT_RPM,
            expires_in_days: None,
        }
    }

    pub fn with_rate_limit_rpm(mut self, rpm: u32) -> Self {
        self.rate_limit_rpm = rpm;
        self
    }

    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expires_in_days = Some(days);
        self
    }

    pub(super) fn validate(&self) -> Result<(), AdminError> {
        if self.name.trim().is_empty() {
            return Err(AdminError::InvalidRequest("key name must not be empty".into()));
        }
        Ok(())
    }
}

/// One entry of `GET /api/v1/api-keys`. The secret itself is never listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub key_prefix: String,
    pub permissions: Vec<String>,
    pub rate_limit_rpm: u32,
    pub last_used_at: Option<String>,
    pub created_at: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiKeyList {
    keys: Vec<ApiKeyRecord>,
}

/// Response of a successful create. `key` is shown exactly once.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedApiKey {
    pub id: String,
    pub key: String,
    pub name: String,
    pub message: Option<String>,
}

impl std::fmt::Debug for CreatedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedApiKey")
            .field("id", &self.id)
            .field("key", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl AdminClient {
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, AdminError> {
        debug!("listing API keys");
        let list: ApiKeyList = self.http.execute(self.http.get(API_KEYS_PATH)).await?;
        Ok(list.keys)
    }

    pub async fn create_api_key(&self, request: &CreateApiKey) -> Result<CreatedApiKey, AdminError> {
        request.validate()?;
        let created: CreatedApiKey = self
            .http
            .execute(self.http.post(API_KEYS_PATH).json(request))
            .await?;
        info!(key_id = %created.id, rpm = request.rate_limit_rpm, "created API key");
        Ok(created)
    }

    /// Revoke a key. The server may answer with or without a body.
    pub async fn revoke_api_key(&self, id: &str) -> Result<(), AdminError> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." || id.contains('/') {
            return Err(AdminError::InvalidRequest(format!("invalid key id '{id}'")));
        }
        let url = self
            .http
            .segment_url(API_KEYS_PATH, &[id, "revoke"])
            .ok_or_else(|| AdminError::InvalidRequest("base URL cannot take a path".into()))?;
        self.http
            .execute_discarding_body(self.http.post_url(url))
            .await?;
        info!(key_id = %id, "revoked API key");
        Ok(())
    }
}
