//! Core types for Signalgate

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Normalized signal text - lowercased, trimmed, never blank. Cheaply
/// cloneable; the confidence store, drift window, and trace log all key
/// on this form.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct SignalText(Arc<str>);

impl SignalText {
    /// Normalize a raw line. Returns `None` when the line is blank after
    /// trimming, so blank lines can never enter the pipeline.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(Arc::from(normalized)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignalText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-time admission capability issued by the birth gate.
///
/// Opaque and unique, not a security credential. Valid exactly when the
/// issuing gate instance still holds it in its valid-token set.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct AdmissionToken(Arc<str>);

impl AdmissionToken {
    /// Mint a fresh, globally unique token.
    pub fn issue() -> Self {
        Self(Arc::from(uuid::Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AdmissionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AdmissionToken {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&str> for AdmissionToken {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

/// Final (or tentative) classification of a signal.
///
/// `Observe` only ever appears as a tentative decision: the engine's
/// auto-recovery transition resolves it to `Allow` after the cooldown.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Observe,
    Freeze,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Allow => write!(f, "ALLOW"),
            Decision::Observe => write!(f, "OBSERVE"),
            Decision::Freeze => write!(f, "FREEZE"),
        }
    }
}

/// Urgency context supplied by the caller of `decide`. Used only in the
/// freeze rule, together with irreversibility.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSense {
    Now,
    Soon,
    Later,
}

/// Verdict from the feedback collaborator. Only `Yes`/`No` move a
/// signal's confidence; `None` leaves it untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackResponse {
    Yes,
    No,
    None,
}

/// Birth verification metadata, supplied once at process start.
///
/// Absent fields deserialize to `false`: a missing `behavior_ok` or
/// `format_ok` fails verification, a missing `inject_attempt` passes
/// that check.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationMetadata {
    pub behavior_ok: bool,
    pub format_ok: bool,
    pub inject_attempt: bool,
}

impl VerificationMetadata {
    /// Metadata that passes every birth check.
    pub fn passing() -> Self {
        Self {
            behavior_ok: true,
            format_ok: true,
            inject_attempt: false,
        }
    }
}
