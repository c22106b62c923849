//! ChatTransport trait implementation for HttpTransport.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, Instrument};

use crate::reply::ChatResponseBody;
use crate::{ChatMode, ChatReply, ChatTransport, TransportError};

use super::client::{HttpTransport, CHAT_PATH};

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    prompt: &'a str,
    mode: &'a ChatMode,
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, prompt: &str, mode: &ChatMode) -> Result<ChatReply, TransportError> {
        if prompt.is_empty() {
            return Err(TransportError::EmptyPrompt);
        }

        let span = tracing::debug_span!(
            "nexus_chat",
            correlation_id = %nexus_common::new_correlation_id(),
            mode = %mode,
        );

        async move {
            debug!(prompt_chars = prompt.chars().count(), "NexusAI chat request");
            let request = self.post(CHAT_PATH).json(&ChatRequestBody { prompt, mode });
            let body: ChatResponseBody = self.execute(request).await?;
            Ok::<_, TransportError>(ChatReply::from_body(body))
        }
        .instrument(span)
        .await
    }
}
