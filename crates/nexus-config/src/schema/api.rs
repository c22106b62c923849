//! Remote API connection settings.

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service root; `/api/v1/...` paths are appended to it.
    pub base_url: String,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub timeout_secs: u64,
    /// Connection timeout in seconds (1 up to `timeout_secs`).
    pub connect_timeout_secs: u64,
    /// Prefer `NEXUS_API_KEY`; a key stored here is read when the variable is unset.
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nexusai.com".into(),
            timeout_secs: 60,
            connect_timeout_secs: 10,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
