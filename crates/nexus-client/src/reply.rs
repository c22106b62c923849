//! Chat endpoint response body and the reply handed back to callers.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Per-model accounting the server attaches to a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelUsage {
    pub model_id: String,
    pub provider: Option<String>,
    pub latency_ms: Option<f64>,
    pub tokens: u64,
    pub cost_usd: f64,
}

/// Response body of `POST /api/v1/nexus/chat`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChatResponseBody {
    response: Option<String>,
    request_id: Option<String>,
    mode: Option<String>,
    models_used: Vec<ModelUsage>,
    latency_ms: Option<f64>,
    cost_usd: Option<f64>,
    consensus_score: Option<f64>,
    synthesized: Option<bool>,
    safety_passed: Option<bool>,
    pii_detected: Option<bool>,
}

/// A successful chat exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    /// Assistant text. Empty when the server omitted it.
    pub content: String,
    /// `true` when the body had no `response` field and `content` is a
    /// stand-in empty string rather than server output.
    pub substituted: bool,
    pub request_id: Option<String>,
    pub mode: Option<String>,
    pub models_used: Vec<ModelUsage>,
    pub latency_ms: Option<f64>,
    pub cost_usd: Option<f64>,
    /// Agreement between models in multi-model modes, 0.0 to 1.0.
    pub consensus_score: Option<f64>,
    /// Whether the text was merged from several model outputs.
    pub synthesized: Option<bool>,
    pub safety_passed: Option<bool>,
    pub pii_detected: Option<bool>,
}

impl ChatReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Tokens across every model that served this reply.
    pub fn total_tokens(&self) -> u64 {
        self.models_used
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.tokens))
    }

    pub(crate) fn from_body(body: ChatResponseBody) -> Self {
        let substituted = body.response.is_none();
        if substituted {
            warn!(
                request_id = body.request_id.as_deref().unwrap_or("-"),
                "chat response has no `response` field, using empty text"
            );
        }
        Self {
            content: body.response.unwrap_or_default(),
            substituted,
            request_id: body.request_id,
            mode: body.mode,
            models_used: body.models_used,
            latency_ms: body.latency_ms,
            cost_usd: body.cost_usd,
            consensus_score: body.consensus_score,
            synthesized: body.synthesized,
            safety_passed: body.safety_passed,
            pii_detected: body.pii_detected,
        }
    }
}
