//! Essence extraction — skills, emotions, and the signal trace
//!
//! Every signal the engine sees is absorbed here before any decision is
//! made. The essence is a byproduct of assimilation: skills and emotion
//! counts grow monotonically, the trace is a bounded FIFO, and none of it
//! ever feeds back into ALLOW/OBSERVE/FREEZE.

use serde::Serialize;
use signalgate_core::SignalText;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// Fixed emotion vocabulary scanned as substrings on every absorption.
pub const EMOTION_VOCABULARY: [&str; 6] = ["pain", "fear", "love", "anger", "hurt", "sad"];

/// Any of these characters marks a signal as arithmetic.
const ARITHMETIC_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

#[derive(Debug)]
pub struct EssenceState {
    skills: BTreeSet<String>,
    emotion_counts: BTreeMap<String, u64>,
    trace: VecDeque<String>,
    trace_capacity: usize,
}

impl EssenceState {
    pub fn new(trace_capacity: usize) -> Self {
        Self {
            skills: BTreeSet::new(),
            emotion_counts: BTreeMap::new(),
            trace: VecDeque::new(),
            trace_capacity,
        }
    }

    /// Absorb one signal: skill detection, emotion counting, trace append.
    /// Total — there is no failure path.
    pub fn absorb(&mut self, signal: &SignalText) {
        let text = signal.as_str();

        // Skill checks are independent; a signal may add zero, one, or both.
        if text.contains(&ARITHMETIC_OPERATORS[..]) {
            self.add_skill("calculator");
        }
        if text.contains("if") || text.contains('>') || text.contains('<') {
            self.add_skill("logic");
        }

        for tag in EMOTION_VOCABULARY {
            if text.contains(tag) {
                *self.emotion_counts.entry(tag.to_string()).or_insert(0) += 1;
            }
        }

        self.trace.push_back(text.to_string());
        if self.trace.len() > self.trace_capacity {
            self.trace.pop_front();
        }
    }

    fn add_skill(&mut self, tag: &str) {
        if self.skills.insert(tag.to_string()) {
            debug!("New skill absorbed: {}", tag);
        }
    }

    pub fn has_skill(&self, tag: &str) -> bool {
        self.skills.contains(tag)
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    /// Occurrence count for an emotion tag, zero if never seen.
    pub fn emotion_count(&self, tag: &str) -> u64 {
        self.emotion_counts.get(tag).copied().unwrap_or(0)
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    /// The trace in arrival order, oldest first.
    pub fn trace(&self) -> impl Iterator<Item = &str> {
        self.trace.iter().map(String::as_str)
    }

    /// Serializable summary for display at shutdown. Snapshots never feed
    /// back into decisions.
    pub fn snapshot(&self) -> EssenceSnapshot {
        EssenceSnapshot {
            skills: self.skills.iter().cloned().collect(),
            emotion_counts: self.emotion_counts.clone(),
            signals_traced: self.trace.len(),
        }
    }
}

/// Point-in-time summary of the absorbed essence.
#[derive(Debug, Clone, Serialize)]
pub struct EssenceSnapshot {
    pub skills: Vec<String>,
    pub emotion_counts: BTreeMap<String, u64>,
    pub signals_traced: usize,
}
