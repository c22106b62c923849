//! Token and cost accounting for replies received in a session.

use std::collections::HashMap;

use crate::ChatReply;

/// Usage attributed to one model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelTotals {
    pub tokens: u64,
    pub cost_usd: f64,
    pub calls: u64,
}

/// Tracks cumulative usage per model across the replies of a session.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    total_tokens: u64,
    total_cost_usd: f64,
    by_model: HashMap<String, ModelTotals>,
    reply_count: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metadata of one reply. Missing figures count as zero.
    ///
    /// The reply-level `cost_usd` wins over the per-model sum when present,
    /// since the server may bill synthesis separately.
    pub fn record(&mut self, reply: &ChatReply) {
        self.reply_count += 1;
        self.total_tokens = self.total_tokens.saturating_add(reply.total_tokens());

        let model_cost: f64 = reply.models_used.iter().map(|m| m.cost_usd).sum();
        self.total_cost_usd += reply.cost_usd.unwrap_or(model_cost);

        for model in &reply.models_used {
            let entry = self.by_model.entry(model.model_id.clone()).or_default();
            entry.tokens = entry.tokens.saturating_add(model.tokens);
            entry.cost_usd += model.cost_usd;
            entry.calls += 1;
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn total_cost_usd(&self) -> f64 {
        self.total_cost_usd
    }

    pub fn for_model(&self, model_id: &str) -> Option<&ModelTotals> {
        self.by_model.get(model_id)
    }

    /// Models seen so far, sorted by id.
    pub fn models(&self) -> Vec<(&str, &ModelTotals)> {
        let mut models: Vec<_> = self
            .by_model
            .iter()
            .map(|(id, totals)| (id.as_str(), totals))
            .collect();
        models.sort_by(|a, b| a.0.cmp(b.0));
        models
    }

    pub fn reply_count(&self) -> u64 {
        self.reply_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
