//! Chat session settings.

use serde::{Deserialize, Serialize};

/// Behaviour when a turn is submitted while another is in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyMode {
    #[default]
    Reject,
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// NEXUS mode tag sent with each turn (chat, code, reasoning, ...).
    pub mode: String,
    pub concurrency: ConcurrencyMode,
    /// Reject a repeat of the previous user turn sent within this many
    /// seconds. 0 allows duplicates (valid range: 0-3600).
    pub duplicate_window_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: "chat".into(),
            concurrency: ConcurrencyMode::Reject,
            duplicate_window_secs: 0,
        }
    }
}
