//! Human-in-the-loop feedback collaborators
//!
//! The engine consults a collaborator after every decision; only a
//! definite yes/no moves confidence. `NoFeedback` (always none) lives in
//! the engine crate; the interactive prompt lives here because it owns
//! the terminal.

use signalgate_core::{Decision, FeedbackResponse};
use signalgate_engine::runtime::FeedbackCollaborator;
use std::io::{self, BufRead, Write};

/// Prompts on stdout and reads one verdict line from stdin per signal.
/// `y`/`yes` and `n`/`no` count; anything else means no feedback given.
pub struct PromptFeedback;

impl FeedbackCollaborator for PromptFeedback {
    fn review(&mut self, signal: &str, decision: Decision) -> FeedbackResponse {
        print!("{} → {} — correct? [y/n/skip] ", signal, decision);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return FeedbackResponse::None;
        }
        parse_verdict(&answer)
    }
}

fn parse_verdict(answer: &str) -> FeedbackResponse {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => FeedbackResponse::Yes,
        "n" | "no" => FeedbackResponse::No,
        _ => FeedbackResponse::None,
    }
}
