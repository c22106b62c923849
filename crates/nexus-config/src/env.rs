//! Environment overrides and credential resolution.

use nexus_common::ConfigError;
use tracing::debug;

use crate::schema::{ApiConfig, NexusConfig};

pub const API_URL_ENV: &str = "NEXUS_API_URL";
pub const API_KEY_ENV: &str = "NEXUS_API_KEY";

/// Apply `NEXUS_API_URL` and `NEXUS_API_KEY` on top of file values.
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn apply_env_overrides(config: &mut NexusConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!("base URL overridden by {API_URL_ENV}");
        config.api.base_url = url.trim().to_string();
    }
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        config.api.api_key = Some(key.trim().to_string());
    }
}

/// The API key to send, or an error telling the user where to put one.
pub fn resolve_api_key(api: &ApiConfig) -> Result<String, ConfigError> {
    api.api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .ok_or_else(|| {
            ConfigError::MissingCredential(format!(
                "set {API_KEY_ENV} or api.api_key in config.toml"
            ))
        })
}
