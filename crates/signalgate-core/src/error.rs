//! Error types for Signalgate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn verification_failed(reason: impl Into<String>) -> Self {
        Self::VerificationFailed {
            reason: reason.into(),
        }
    }
}
