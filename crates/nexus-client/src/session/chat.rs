//! Turn submission for Session.

use tracing::{debug, warn};

use crate::{ChatReply, Turn};

use super::manager::Session;
use super::types::{DuplicatePolicy, SubmitError, SubmitGuard};

impl Session {
    /// Submit a user turn and wait for the assistant's reply.
    ///
    /// The user turn is appended before the request is sent, so observers
    /// see it immediately. On success the assistant turn follows it. On a
    /// transport failure the user turn stays and nothing else is appended.
    /// Validation, busy and duplicate rejections leave the history as it was.
    pub async fn submit_turn(&self, content: impl Into<String>) -> Result<ChatReply, SubmitError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SubmitError::EmptyContent);
        }

        let _guard = SubmitGuard::acquire(&self.slot, self.options.concurrency).await?;

        if let DuplicatePolicy::RejectWithin(window) = self.options.duplicates {
            if self.repeats_last_user_turn(&content, window) {
                warn!(session = %self.id, "rejecting duplicate submission");
                return Err(SubmitError::Duplicate { window });
            }
        }

        self.append(Turn::user(content.clone()));
        debug!(session = %self.id, mode = %self.options.mode, "submitting turn");

        match self.transport.send(&content, &self.options.mode).await {
            Ok(reply) => {
                self.usage
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .record(&reply);
                self.append(Turn::assistant(reply.content.clone()));
                Ok(reply)
            }
            Err(e) => {
                warn!(session = %self.id, "turn submission failed: {e}");
                Err(SubmitError::Transport(e))
            }
        }
    }
}
