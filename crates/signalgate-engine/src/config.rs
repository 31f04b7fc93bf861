//! Gateway configuration
//!
//! All tunable thresholds in one place. Loaded from TOML at startup,
//! falls back to defaults if no config file exists. The defaults are the
//! gateway's canonical constants; the documented invariants are stated
//! against them.

use serde::{Deserialize, Serialize};
use signalgate_core::VerificationMetadata;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration: birth metadata plus engine tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalgateConfig {
    /// Birth verification metadata, supplied once at process start.
    pub birth: VerificationMetadata,
    /// Decision engine tuning.
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Confidence store parameters.
    pub trust: TrustConfig,
    /// Drift window parameters.
    pub drift: DriftConfig,
    /// Decision rule thresholds and cooldown.
    pub decision: DecisionConfig,
    /// Essence trace parameters.
    pub essence: EssenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Score assumed for signals never seen by feedback.
    pub default_confidence: f64,
    /// Step added on positive feedback.
    pub reward_step: f64,
    /// Step subtracted on negative feedback. Larger than the reward step:
    /// distrust is penalized faster than it is earned back.
    pub penalty_step: f64,
    /// Lowest score a signal can reach.
    pub floor: f64,
    /// Highest score a signal can reach.
    pub ceiling: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// How many recent signals the window retains (FIFO).
    pub window_capacity: usize,
    /// Occurrences within the window beyond which a signal counts as drift.
    pub repeat_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Confidence above which a signal is tentatively observed.
    pub observe_threshold: f64,
    /// Residual uncertainty (1 - confidence) above which an immediate,
    /// irreversible signal freezes.
    pub epsilon_limit: f64,
    /// Cooldown pause in milliseconds for the OBSERVE → ALLOW transition.
    pub cooldown_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EssenceConfig {
    /// Max entries retained in the signal trace (FIFO).
    pub trace_capacity: usize,
}

// ============================================================
// Defaults
// ============================================================

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            default_confidence: 0.5,
            reward_step: 0.05,
            penalty_step: 0.1,
            floor: 0.01,
            ceiling: 0.99,
        }
    }
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            window_capacity: 50,
            repeat_limit: 15,
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            observe_threshold: 0.98,
            epsilon_limit: 0.1,
            cooldown_ms: 2_000,
        }
    }
}

impl Default for EssenceConfig {
    fn default() -> Self {
        Self {
            trace_capacity: 1_000,
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl SignalgateConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {} — using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {} — using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl DecisionConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}
