//! Decision engine — confidence, drift, and the cooldown state machine
//!
//! The engine exclusively owns all mutable gateway state: the confidence
//! store, the recent-signal window, and the absorbed essence. Nothing
//! outside it writes them.
//!
//! `evaluate` produces the tentative decision; `decide` applies the
//! auto-recovery transition on top: a tentative OBSERVE pauses the whole
//! pipeline for the cooldown, clears the recent-signal window, and
//! resolves to ALLOW. OBSERVE is therefore never the final externally
//! visible decision. FREEZE and the default ALLOW return immediately.

use crate::config::EngineConfig;
use crate::drift::DriftWatcher;
use crate::essence::{EssenceSnapshot, EssenceState};
use crate::trust::ConfidenceStore;
use signalgate_core::{Decision, SignalText, TimeSense};
use std::time::Duration;
use tracing::{debug, info};

pub struct DecisionEngine {
    trust: ConfidenceStore,
    drift: DriftWatcher,
    essence: EssenceState,
    cooldown: Duration,
    observe_threshold: f64,
    epsilon_limit: f64,
    cooldowns: u64,
}

impl DecisionEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            trust: ConfidenceStore::new(config.trust.clone()),
            drift: DriftWatcher::new(config.drift.clone()),
            essence: EssenceState::new(config.essence.trace_capacity),
            cooldown: config.decision.cooldown(),
            observe_threshold: config.decision.observe_threshold,
            epsilon_limit: config.decision.epsilon_limit,
            cooldowns: 0,
        }
    }

    /// Absorb a signal's essence. Runs before `decide` for every signal;
    /// its outputs never feed back into the decision.
    pub fn assimilate(&mut self, signal: &SignalText) {
        self.essence.absorb(signal);
    }

    /// Tentative decision. Rules apply in priority order, first match wins:
    /// high confidence → OBSERVE, drift → OBSERVE, immediate + irreversible
    /// + residual uncertainty → FREEZE, otherwise ALLOW.
    pub fn evaluate(
        &mut self,
        signal: &SignalText,
        time_sense: TimeSense,
        irreversible: bool,
    ) -> Decision {
        let confidence = self.trust.confidence(signal);
        let epsilon = 1.0 - confidence;

        // The window records every evaluated signal before drift is judged.
        self.drift.record(signal);
        let drifting = self.drift.is_drifting(signal);

        let decision = if confidence > self.observe_threshold {
            Decision::Observe
        } else if drifting {
            Decision::Observe
        } else if time_sense == TimeSense::Now && irreversible && epsilon > self.epsilon_limit {
            Decision::Freeze
        } else {
            Decision::Allow
        };

        debug!(
            "Evaluated '{}': confidence {:.2}, drifting {} → {}",
            signal, confidence, drifting, decision
        );
        decision
    }

    /// Final decision. A tentative OBSERVE takes the cooldown transition:
    /// an uninterruptible pause that blocks the whole pipeline, then a
    /// wholesale clear of the recent-signal window, then ALLOW.
    pub async fn decide(
        &mut self,
        signal: &SignalText,
        time_sense: TimeSense,
        irreversible: bool,
    ) -> Decision {
        match self.evaluate(signal, time_sense, irreversible) {
            Decision::Observe => {
                self.cooldowns += 1;
                info!("Observing '{}' — cooling down for {:?}", signal, self.cooldown);
                tokio::time::sleep(self.cooldown).await;
                self.drift.reset();
                info!("Cooldown complete, recent-signal window cleared");
                Decision::Allow
            }
            terminal => terminal,
        }
    }

    /// Apply external feedback to the signal's confidence. Keys on the
    /// normalized form, same as `assimilate` and `decide`.
    pub fn feedback(&mut self, signal: &SignalText, success: bool) {
        self.trust.record(signal, success);
    }

    pub fn confidence(&self, signal: &SignalText) -> f64 {
        self.trust.confidence(signal)
    }

    pub fn drift(&self) -> &DriftWatcher {
        &self.drift
    }

    pub fn essence(&self) -> &EssenceState {
        &self.essence
    }

    pub fn essence_snapshot(&self) -> EssenceSnapshot {
        self.essence.snapshot()
    }

    /// How many cooldown transitions have been taken so far.
    pub fn cooldowns(&self) -> u64 {
        self.cooldowns
    }
}
