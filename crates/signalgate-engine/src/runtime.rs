//! Signal runtime — admission, then the sequential processing loop
//!
//! One signal is fully processed (assimilate → decide → optional
//! feedback) before the next is read. A runtime exists only after a
//! successful birth verification; a failed birth means no signal is ever
//! processed.

use crate::config::SignalgateConfig;
use crate::engine::DecisionEngine;
use crate::gate::BirthGate;
use signalgate_core::{
    AdmissionToken, Decision, FeedbackResponse, Result, SignalText, TimeSense,
};
use tracing::{debug, info};

/// Ordered source of raw text lines. `None` ends the stream; EOF/reopen
/// semantics belong to implementations.
pub trait SignalSource {
    fn next_signal(&mut self) -> Option<String>;
}

/// Optional human-in-the-loop feedback, consulted after every decision.
pub trait FeedbackCollaborator {
    fn review(&mut self, signal: &str, decision: Decision) -> FeedbackResponse;
}

/// Collaborator that never offers feedback.
pub struct NoFeedback;

impl FeedbackCollaborator for NoFeedback {
    fn review(&mut self, _signal: &str, _decision: Decision) -> FeedbackResponse {
        FeedbackResponse::None
    }
}

/// Counters for one drained source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: u64,
    pub allowed: u64,
    pub frozen: u64,
    pub skipped: u64,
    pub cooldowns: u64,
}

pub struct SignalRuntime {
    gate: BirthGate,
    token: AdmissionToken,
    engine: DecisionEngine,
}

impl SignalRuntime {
    /// One-time admission through the birth gate. Fails with
    /// `VerificationFailed` when any birth precondition does not hold.
    pub fn admit(config: &SignalgateConfig) -> Result<Self> {
        let mut gate = BirthGate::new();
        let token = gate.verify_and_issue(&config.birth)?;
        Ok(Self {
            gate,
            token,
            engine: DecisionEngine::new(&config.engine),
        })
    }

    pub fn token(&self) -> &AdmissionToken {
        &self.token
    }

    pub fn is_admitted(&self) -> bool {
        self.gate.verify_token(&self.token)
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Direct engine access, for callers that invoke `decide` with their
    /// own urgency/reversibility context.
    pub fn engine_mut(&mut self) -> &mut DecisionEngine {
        &mut self.engine
    }

    /// Process one raw line. Blank lines (after trimming) are skipped
    /// without being assimilated or decided upon. Runtime-driven signals
    /// carry fixed context: immediate, reversible.
    pub async fn process_signal(
        &mut self,
        raw: &str,
        feedback: &mut dyn FeedbackCollaborator,
    ) -> Option<Decision> {
        let signal = SignalText::new(raw)?;

        self.engine.assimilate(&signal);
        let decision = self.engine.decide(&signal, TimeSense::Now, false).await;
        info!("{} → {}", signal, decision);

        match feedback.review(signal.as_str(), decision) {
            FeedbackResponse::Yes => self.engine.feedback(&signal, true),
            FeedbackResponse::No => self.engine.feedback(&signal, false),
            FeedbackResponse::None => {}
        }

        Some(decision)
    }

    /// Drain a source in strict arrival order, one signal at a time.
    pub async fn run(
        &mut self,
        source: &mut dyn SignalSource,
        feedback: &mut dyn FeedbackCollaborator,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        while let Some(line) = source.next_signal() {
            match self.process_signal(&line, feedback).await {
                Some(decision) => {
                    summary.processed += 1;
                    match decision {
                        Decision::Allow => summary.allowed += 1,
                        Decision::Freeze => summary.frozen += 1,
                        // Never final: the cooldown resolves it to ALLOW.
                        Decision::Observe => {}
                    }
                }
                None => {
                    debug!("Blank line skipped");
                    summary.skipped += 1;
                }
            }
        }

        summary.cooldowns = self.engine.cooldowns();
        info!(
            "Source drained: {} processed, {} allowed, {} frozen, {} skipped, {} cooldowns",
            summary.processed, summary.allowed, summary.frozen, summary.skipped, summary.cooldowns
        );
        summary
    }
}
