//! Session options, submission errors, and the in-flight guard.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::{ChatMode, TransportError};

/// What happens when a submission arrives while another is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyPolicy {
    /// Fail fast with `SubmitError::Busy`.
    #[default]
    Reject,
    /// Wait for the in-flight submission to finish, then run.
    Queue,
}

/// Client-side handling of repeated user content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Every submission goes through, identical or not.
    #[default]
    Allow,
    /// Reject content equal to the previous user turn if that turn is
    /// younger than the window.
    RejectWithin(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Mode sent with every submission of this session.
    pub mode: ChatMode,
    pub concurrency: ConcurrencyPolicy,
    pub duplicates: DuplicatePolicy,
}

impl SessionOptions {
    pub fn with_mode(mut self, mode: ChatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_concurrency(mut self, policy: ConcurrencyPolicy) -> Self {
        self.concurrency = policy;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("turn content must not be empty")]
    EmptyContent,
    #[error("session is busy with another submission")]
    Busy,
    #[error("duplicate submission within {window:?}")]
    Duplicate { window: Duration },
    /// The user turn was appended; no assistant turn followed.
    #[error("chat request failed: {0}")]
    Transport(#[from] TransportError),
}

impl SubmitError {
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<SubmitError> for nexus_common::NexusError {
    fn from(err: SubmitError) -> Self {
        nexus_common::NexusError::Chat(err.to_string())
    }
}

/// Holds the session's single submission slot. Dropping it, including
/// when the submitting future is cancelled, frees the slot.
pub(super) struct SubmitGuard<'a> {
    _slot: MutexGuard<'a, ()>,
}

impl<'a> SubmitGuard<'a> {
    pub(super) async fn acquire(
        slot: &'a Mutex<()>,
        policy: ConcurrencyPolicy,
    ) -> Result<Self, SubmitError> {
        let guard = match policy {
            ConcurrencyPolicy::Reject => slot.try_lock().map_err(|_| SubmitError::Busy)?,
            ConcurrencyPolicy::Queue => slot.lock().await,
        };
        Ok(Self { _slot: guard })
    }
}
