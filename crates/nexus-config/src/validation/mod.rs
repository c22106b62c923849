//! Configuration validation.
//!
//! Each section has its own check; all errors are collected into a single
//! `ConfigError`.

mod helpers;


use crate::schema::NexusConfig;
use helpers::validate_range;
use nexus_common::ConfigError;

/// Largest per-request timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 600;
/// Largest duplicate-rejection window accepted, in seconds.
pub const MAX_DUPLICATE_WINDOW_SECS: u64 = 3600;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NexusConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_chat(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &NexusConfig) {
    let api = &config.api;
    let url = api.base_url.trim();
    if url.is_empty() {
        errors.push("api.base_url must not be empty".into());
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("api.base_url = {url} must start with http:// or https://"));
    }

    validate_range(errors, "api.timeout_secs", api.timeout_secs, 1, MAX_TIMEOUT_SECS);
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        api.timeout_secs.max(1),
    );
}

fn validate_chat(errors: &mut Vec<String>, config: &NexusConfig) {
    if config.chat.mode.trim().is_empty() {
        errors.push("chat.mode must not be empty".into());
    }
    validate_range(
        errors,
        "chat.duplicate_window_secs",
        config.chat.duplicate_window_secs,
        0,
        MAX_DUPLICATE_WINDOW_SECS,
    );
}

fn validate_logging(errors: &mut Vec<String>, config: &NexusConfig) {
    if config.logging.level.trim().is_empty() {
        errors.push("logging.level must not be empty".into());
    }
}
