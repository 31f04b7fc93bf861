//! Birth gate — one-time admission verification
//!
//! Verifies the birth metadata and issues an opaque admission token.
//! The gate has exactly two states: pre-birth (no tokens issued) and
//! post-birth; there is no transition back.

use signalgate_core::{AdmissionToken, Error, Result, VerificationMetadata};
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct BirthGate {
    issued: HashSet<AdmissionToken>,
}

impl BirthGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify birth metadata and issue a fresh admission token.
    ///
    /// Intended to be called at most once per gate instance; callers must
    /// not rely on repeat-call behavior.
    pub fn verify_and_issue(&mut self, meta: &VerificationMetadata) -> Result<AdmissionToken> {
        if !meta.behavior_ok {
            warn!("Birth rejected: behavior check failed");
            return Err(Error::verification_failed("behavior check failed"));
        }
        if !meta.format_ok {
            warn!("Birth rejected: format check failed");
            return Err(Error::verification_failed("format check failed"));
        }
        if meta.inject_attempt {
            warn!("Birth rejected: injection attempt flagged");
            return Err(Error::verification_failed("injection attempt flagged"));
        }

        let token = AdmissionToken::issue();
        self.issued.insert(token.clone());
        info!("Birth verified, admission token issued: {}", token);
        Ok(token)
    }

    /// Membership check against the valid-token set. No mutation.
    pub fn verify_token(&self, token: &AdmissionToken) -> bool {
        self.issued.contains(token)
    }

    /// True once at least one token has been issued.
    pub fn is_post_birth(&self) -> bool {
        !self.issued.is_empty()
    }
}
