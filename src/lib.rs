//! Signalgate — binary surface: transports and the feedback prompt
//!
//! The decision core lives in `signalgate-engine`; this crate only wires
//! it to a process: line sources, the interactive feedback prompt, and
//! the `signalgate` binary.

pub mod feedback;
pub mod source;
