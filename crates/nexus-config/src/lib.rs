//! NexusAI console configuration.
//!
//! TOML file in the platform config directory, overridable from the
//! environment, validated before use. Every section has defaults so a
//! partial (or absent) file works.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nexus_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("talking to {}", config.api.base_url);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, resolve_api_key, API_KEY_ENV, API_URL_ENV};
pub use schema::{ApiConfig, ChatConfig, ConcurrencyMode, LoggingConfig, NexusConfig};

use std::path::Path;

use nexus_common::ConfigError;

/// Load config from `path`, or from the platform default when `None`.
///
/// The default file is created from a commented template if missing.
/// Environment overrides are applied before validation.
pub fn load_config(path: Option<&Path>) -> Result<NexusConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to pretty JSON with the API key masked.
pub fn config_to_json(config: &NexusConfig) -> String {
    let mut redacted = config.clone();
    if redacted.api.api_key.is_some() {
        redacted.api.api_key = Some("[REDACTED]".into());
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
