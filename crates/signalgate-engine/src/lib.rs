//! Signalgate Engine — birth gate, essence extraction, and the decision
//! state machine
//!
//! Pipeline per signal: assimilate → decide → optional feedback, strictly
//! sequential. Admission through the birth gate happens exactly once, at
//! startup, before any signal is read.

pub mod config;
pub mod drift;
pub mod engine;
pub mod essence;
pub mod gate;
pub mod runtime;
pub mod trust;

pub use config::SignalgateConfig;
pub use engine::DecisionEngine;
pub use gate::BirthGate;
pub use runtime::{FeedbackCollaborator, NoFeedback, RunSummary, SignalRuntime, SignalSource};
