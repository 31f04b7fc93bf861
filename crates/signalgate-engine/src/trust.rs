//! Learned per-signal confidence
//!
//! Scores live in `[floor, ceiling]`, keyed by exact normalized signal
//! text, and move only through explicit feedback. Entries are never
//! deleted. Reward and penalty steps are asymmetric: distrust is penalized
//! faster than it is earned back.

use crate::config::TrustConfig;
use signalgate_core::SignalText;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug)]
pub struct ConfidenceStore {
    scores: HashMap<String, f64>,
    config: TrustConfig,
}

impl ConfidenceStore {
    pub fn new(config: TrustConfig) -> Self {
        Self {
            scores: HashMap::new(),
            config,
        }
    }

    /// Current confidence for a signal; the default for unseen keys.
    pub fn confidence(&self, signal: &SignalText) -> f64 {
        self.scores
            .get(signal.as_str())
            .copied()
            .unwrap_or(self.config.default_confidence)
    }

    /// Apply one feedback verdict to the signal's score.
    pub fn record(&mut self, signal: &SignalText, success: bool) {
        let current = self.confidence(signal);
        let updated = if success {
            (current + self.config.reward_step).min(self.config.ceiling)
        } else {
            (current - self.config.penalty_step).max(self.config.floor)
        };
        debug!("Confidence for '{}': {:.3}→{:.3}", signal, current, updated);
        self.scores.insert(signal.as_str().to_string(), updated);
    }

    /// Number of signals that have received feedback at least once.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
