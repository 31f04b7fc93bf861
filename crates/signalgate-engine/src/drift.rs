//! Repetition drift detection
//!
//! A bounded FIFO window of the most recent signals. A signal repeating
//! past the limit inside the window counts as drift. The window is
//! cleared wholesale only after a completed cooldown pause.

use crate::config::DriftConfig;
use signalgate_core::SignalText;
use std::collections::VecDeque;

#[derive(Debug)]
pub struct DriftWatcher {
    window: VecDeque<String>,
    config: DriftConfig,
}

impl DriftWatcher {
    pub fn new(config: DriftConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.window_capacity),
            config,
        }
    }

    /// Record a signal, evicting the oldest entry past capacity.
    pub fn record(&mut self, signal: &SignalText) {
        self.window.push_back(signal.as_str().to_string());
        if self.window.len() > self.config.window_capacity {
            self.window.pop_front();
        }
    }

    /// Occurrences of the signal in the current window.
    pub fn occurrences(&self, signal: &SignalText) -> usize {
        self.window.iter().filter(|s| *s == signal.as_str()).count()
    }

    pub fn is_drifting(&self, signal: &SignalText) -> bool {
        self.occurrences(signal) > self.config.repeat_limit
    }

    /// Clear the window wholesale.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
