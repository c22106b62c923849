//! Translate loaded configuration into client types.

use std::time::Duration;

use nexus_client::{ChatMode, ConcurrencyPolicy, DuplicatePolicy, EndpointConfig, SessionOptions};
use nexus_config::{resolve_api_key, ChatConfig, ConcurrencyMode, NexusConfig};
use nexus_common::ConfigError;
use tracing::warn;

pub fn endpoint_config(config: &NexusConfig) -> Result<EndpointConfig, ConfigError> {
    let api_key = resolve_api_key(&config.api)?;
    Ok(EndpointConfig::new(api_key)
        .with_base_url(config.api.base_url.clone())
        .with_timeout(Duration::from_secs(config.api.timeout_secs))
        .with_connect_timeout(Duration::from_secs(config.api.connect_timeout_secs)))
}

/// Session options from `[chat]`, with an optional mode from the command line.
pub fn session_options(chat: &ChatConfig, mode_override: Option<&str>) -> SessionOptions {
    let concurrency = match chat.concurrency {
        ConcurrencyMode::Reject => ConcurrencyPolicy::Reject,
        ConcurrencyMode::Queue => ConcurrencyPolicy::Queue,
    };
    let duplicates = match chat.duplicate_window_secs {
        0 => DuplicatePolicy::Allow,
        secs => DuplicatePolicy::RejectWithin(Duration::from_secs(secs)),
    };
    let mode = ChatMode::from(mode_override.unwrap_or(&chat.mode).trim());
    if !mode.is_known() {
        warn!(%mode, "unrecognised chat mode, sending it as-is");
    }
    SessionOptions::default()
        .with_mode(mode)
        .with_concurrency(concurrency)
        .with_duplicates(duplicates)
}
