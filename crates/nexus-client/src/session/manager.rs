//! Session struct and read access for observers.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use nexus_common::ConversationId;
use tokio::sync::watch;

use crate::usage::UsageTracker;
use crate::{ChatTransport, Role, Turn};

use super::types::SessionOptions;

/// One conversation: its turns, its transport, and its submission slot.
///
/// Share it behind an `Arc` to let a UI read while a submission runs.
/// `submit_turn` is the only way to change the history.
pub struct Session {
    pub(super) id: ConversationId,
    pub(super) transport: Arc<dyn ChatTransport>,
    pub(super) options: SessionOptions,
    /// Turn history. The watch channel doubles as the change feed.
    pub(super) turns: watch::Sender<Vec<Turn>>,
    pub(super) usage: Mutex<UsageTracker>,
    /// Held for the whole of one submission.
    pub(super) slot: tokio::sync::Mutex<()>,
}

impl Session {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self::with_options(transport, SessionOptions::default())
    }

    pub fn with_options(transport: Arc<dyn ChatTransport>, options: SessionOptions) -> Self {
        let (turns, _) = watch::channel(Vec::new());
        Self {
            id: ConversationId::new(),
            transport,
            options,
            turns,
            usage: Mutex::new(UsageTracker::new()),
            slot: tokio::sync::Mutex::new(()),
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Copy of the history as it stands right now.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.borrow().clone()
    }

    /// Run `f` over the current history without copying it.
    ///
    /// Do not call back into the session from `f`.
    pub fn with_turns<R>(&self, f: impl FnOnce(&[Turn]) -> R) -> R {
        f(&self.turns.borrow())
    }

    /// Receiver that is notified after every append.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Turn>> {
        self.turns.subscribe()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_count() == 0
    }

    /// Whether a submission currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.slot.try_lock().is_err()
    }

    /// Snapshot of the usage recorded from replies so far.
    pub fn usage(&self) -> UsageTracker {
        self.usage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Zero the usage totals. The turn history is not touched.
    pub fn reset_usage(&self) {
        self.usage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }

    pub(super) fn append(&self, turn: Turn) {
        self.turns.send_modify(|turns| turns.push(turn));
    }

    /// True when `content` repeats the last user turn within `window`.
    pub(super) fn repeats_last_user_turn(&self, content: &str, window: Duration) -> bool {
        self.with_turns(|turns| {
            turns
                .iter()
                .rev()
                .find(|t| t.role == Role::User)
                .is_some_and(|last| {
                    last.content == content
                        && (Utc::now() - last.created_at)
                            .to_std()
                            .map_or(true, |age| age < window)
                })
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("turns", &self.turn_count())
            .finish()
    }
}
