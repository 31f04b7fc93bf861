//! Integration tests for signalgate-engine
//!
//! These tests validate the public API surface of the gateway:
//! - BirthGate admission contract
//! - Essence extraction (skills, emotions, trace cap)
//! - Confidence bounds under repeated feedback
//! - Drift detection and the cooldown auto-recovery transition
//! - Freeze reachability and the default allow path
//! - SignalRuntime orchestration and summaries

use signalgate_core::{
    AdmissionToken, Decision, Error, FeedbackResponse, SignalText, TimeSense,
    VerificationMetadata,
};
use signalgate_engine::config::SignalgateConfig;
use signalgate_engine::engine::DecisionEngine;
use signalgate_engine::gate::BirthGate;
use signalgate_engine::runtime::{
    FeedbackCollaborator, NoFeedback, SignalRuntime, SignalSource,
};

fn sig(s: &str) -> SignalText {
    SignalText::new(s).expect("non-blank signal")
}

/// Passing birth metadata and a cooldown short enough for tests.
fn fast_config() -> SignalgateConfig {
    let mut config = SignalgateConfig::default();
    config.birth = VerificationMetadata::passing();
    config.engine.decision.cooldown_ms = 10;
    config
}

struct Script(std::vec::IntoIter<String>);

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self(
            lines
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }
}

impl SignalSource for Script {
    fn next_signal(&mut self) -> Option<String> {
        self.0.next()
    }
}

struct ScriptedFeedback {
    responses: std::vec::IntoIter<FeedbackResponse>,
    reviewed: Vec<(String, Decision)>,
}

impl ScriptedFeedback {
    fn new(responses: &[FeedbackResponse]) -> Self {
        Self {
            responses: responses.to_vec().into_iter(),
            reviewed: Vec::new(),
        }
    }
}

impl FeedbackCollaborator for ScriptedFeedback {
    fn review(&mut self, signal: &str, decision: Decision) -> FeedbackResponse {
        self.reviewed.push((signal.to_string(), decision));
        self.responses.next().unwrap_or(FeedbackResponse::None)
    }
}

// ============================================================
// BirthGate — admission contract
// ============================================================

#[test]
fn birth_fails_on_each_precondition() {
    let cases = [
        VerificationMetadata { behavior_ok: false, format_ok: true, inject_attempt: false },
        VerificationMetadata { behavior_ok: true, format_ok: false, inject_attempt: false },
        VerificationMetadata { behavior_ok: true, format_ok: true, inject_attempt: true },
    ];
    for meta in cases {
        let mut gate = BirthGate::new();
        let result = gate.verify_and_issue(&meta);
        assert!(
            matches!(result, Err(Error::VerificationFailed { .. })),
            "expected VerificationFailed for {:?}",
            meta
        );
        assert!(!gate.is_post_birth(), "no token may be recorded for {:?}", meta);
    }
}

#[test]
fn birth_success_issues_a_verifiable_token() {
    let mut gate = BirthGate::new();
    let token = gate.verify_and_issue(&VerificationMetadata::passing()).unwrap();
    assert!(gate.verify_token(&token));
    assert!(!gate.verify_token(&AdmissionToken::from("some other string")));
    assert!(gate.is_post_birth());
}

// ============================================================
// Essence — normalization, skills, emotions, trace cap
// ============================================================

#[test]
fn assimilation_is_normalization_insensitive() {
    let config = fast_config();
    let mut noisy = DecisionEngine::new(&config.engine);
    let mut clean = DecisionEngine::new(&config.engine);

    noisy.assimilate(&sig("  Pain!! "));
    clean.assimilate(&sig("pain!!"));

    assert_eq!(noisy.essence().emotion_count("pain"), 1);
    assert_eq!(clean.essence().emotion_count("pain"), 1);
    let noisy_skills: Vec<&str> = noisy.essence().skills().collect();
    let clean_skills: Vec<&str> = clean.essence().skills().collect();
    assert_eq!(noisy_skills, clean_skills);
}

#[test]
fn skill_detection_on_canonical_examples() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);

    engine.assimilate(&sig("3 + 4"));
    assert!(engine.essence().has_skill("calculator"));
    assert!(!engine.essence().has_skill("logic"));

    let mut engine = DecisionEngine::new(&config.engine);
    engine.assimilate(&sig("if x > 2"));
    assert!(engine.essence().has_skill("logic"));
    assert!(!engine.essence().has_skill("calculator"));
}

#[test]
fn emotion_counts_double_after_two_assimilations() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    engine.assimilate(&sig("I feel pain and fear"));
    engine.assimilate(&sig("I feel pain and fear"));
    assert_eq!(engine.essence().emotion_count("pain"), 2);
    assert_eq!(engine.essence().emotion_count("fear"), 2);
}

#[test]
fn trace_caps_at_capacity_keeping_most_recent() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    for i in 1..=1001 {
        engine.assimilate(&sig(&format!("signal {}", i)));
    }
    assert_eq!(engine.essence().trace_len(), 1000);
    let first = engine.essence().trace().next().unwrap().to_string();
    let last = engine.essence().trace().last().unwrap().to_string();
    assert_eq!(first, "signal 2");
    assert_eq!(last, "signal 1001");
}

// ============================================================
// Confidence — bounds under repeated feedback
// ============================================================

#[test]
fn confidence_approaches_but_never_exceeds_ceiling() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("reliable signal");
    for _ in 0..100 {
        engine.feedback(&signal, true);
        assert!(engine.confidence(&signal) <= 0.99 + 1e-12);
    }
    assert!((engine.confidence(&signal) - 0.99).abs() < 1e-9);
}

#[test]
fn confidence_never_drops_below_floor() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("unreliable signal");
    for _ in 0..100 {
        engine.feedback(&signal, false);
        assert!(engine.confidence(&signal) >= 0.01 - 1e-12);
    }
    assert!((engine.confidence(&signal) - 0.01).abs() < 1e-9);
}

// ============================================================
// Decision rules — drift, cooldown, freeze, default allow
// ============================================================

#[test]
fn sixteenth_repeat_takes_the_observe_branch() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("same thing again");

    for _ in 0..15 {
        assert_eq!(engine.evaluate(&signal, TimeSense::Now, false), Decision::Allow);
    }
    // 16th occurrence: window count exceeds the repeat limit.
    assert_eq!(engine.evaluate(&signal, TimeSense::Now, false), Decision::Observe);
}

#[tokio::test]
async fn drift_cooldown_resolves_to_allow_and_clears_window() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("same thing again");

    for _ in 0..15 {
        assert_eq!(engine.decide(&signal, TimeSense::Now, false).await, Decision::Allow);
    }
    assert_eq!(engine.cooldowns(), 0);

    let decision = engine.decide(&signal, TimeSense::Now, false).await;
    assert_eq!(decision, Decision::Allow);
    assert_eq!(engine.cooldowns(), 1);
    // Drift counting starts over: the window was cleared after the pause.
    assert!(engine.drift().is_empty());
}

#[tokio::test]
async fn high_confidence_also_takes_the_cooldown() {
    let mut config = fast_config();
    config.engine.trust.default_confidence = 0.985;
    let mut engine = DecisionEngine::new(&config.engine);

    let decision = engine.decide(&sig("anything"), TimeSense::Now, false).await;
    assert_eq!(decision, Decision::Allow);
    assert_eq!(engine.cooldowns(), 1);
}

#[tokio::test]
async fn freeze_requires_immediacy_irreversibility_and_uncertainty() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("dangerous move");

    // Seven rewards from 0.5: confidence 0.85, epsilon 0.15 > 0.1.
    for _ in 0..7 {
        engine.feedback(&signal, true);
    }
    assert!((engine.confidence(&signal) - 0.85).abs() < 1e-9);

    let decision = engine.decide(&signal, TimeSense::Now, true).await;
    assert_eq!(decision, Decision::Freeze);
    assert_eq!(engine.cooldowns(), 0);
}

#[tokio::test]
async fn freeze_needs_the_full_conjunction() {
    let config = fast_config();

    // Not irreversible.
    let mut engine = DecisionEngine::new(&config.engine);
    assert_eq!(engine.decide(&sig("x"), TimeSense::Now, false).await, Decision::Allow);

    // Not immediate.
    let mut engine = DecisionEngine::new(&config.engine);
    assert_eq!(engine.decide(&sig("x"), TimeSense::Later, true).await, Decision::Allow);

    // Confident enough: epsilon below the limit.
    let mut engine = DecisionEngine::new(&config.engine);
    let signal = sig("x");
    for _ in 0..9 {
        engine.feedback(&signal, true); // 0.95 → epsilon 0.05
    }
    assert_eq!(engine.decide(&signal, TimeSense::Now, true).await, Decision::Allow);
}

#[tokio::test]
async fn brand_new_signal_allows_by_default() {
    let config = fast_config();
    let mut engine = DecisionEngine::new(&config.engine);
    let decision = engine.decide(&sig("never seen before"), TimeSense::Now, false).await;
    assert_eq!(decision, Decision::Allow);
    assert_eq!(engine.cooldowns(), 0);
}

// ============================================================
// SignalRuntime — orchestration
// ============================================================

#[test]
fn failed_birth_prevents_runtime_construction() {
    let mut config = fast_config();
    config.birth.inject_attempt = true;
    let result = SignalRuntime::admit(&config);
    assert!(matches!(result, Err(Error::VerificationFailed { .. })));
}

#[tokio::test]
async fn admitted_runtime_holds_a_valid_token() {
    let runtime = SignalRuntime::admit(&fast_config()).unwrap();
    assert!(runtime.is_admitted());
}

#[tokio::test]
async fn blank_lines_are_skipped_entirely() {
    let mut runtime = SignalRuntime::admit(&fast_config()).unwrap();
    let mut feedback = NoFeedback;
    assert!(runtime.process_signal("   ", &mut feedback).await.is_none());
    assert_eq!(runtime.engine().essence().trace_len(), 0);
    assert!(runtime.engine().drift().is_empty());
}

#[tokio::test]
async fn runtime_context_never_freezes() {
    let mut runtime = SignalRuntime::admit(&fast_config()).unwrap();
    let mut feedback = ScriptedFeedback::new(&[FeedbackResponse::No; 20]);
    // Repeated negative feedback drives confidence toward the floor, but
    // the runtime wiring is reversible so freeze stays unreachable.
    for _ in 0..20 {
        let decision = runtime.process_signal("risky move", &mut feedback).await.unwrap();
        assert_ne!(decision, Decision::Freeze);
    }
}

#[tokio::test]
async fn feedback_plumbing_updates_confidence() {
    let mut runtime = SignalRuntime::admit(&fast_config()).unwrap();
    let mut feedback = ScriptedFeedback::new(&[
        FeedbackResponse::Yes,
        FeedbackResponse::No,
        FeedbackResponse::None,
    ]);

    runtime.process_signal("Hello there", &mut feedback).await;
    assert!((runtime.engine().confidence(&sig("hello there")) - 0.55).abs() < 1e-9);

    runtime.process_signal("Hello there", &mut feedback).await;
    assert!((runtime.engine().confidence(&sig("hello there")) - 0.45).abs() < 1e-9);

    // A "none" response leaves confidence untouched.
    runtime.process_signal("Hello there", &mut feedback).await;
    assert!((runtime.engine().confidence(&sig("hello there")) - 0.45).abs() < 1e-9);

    // The collaborator saw the normalized signal each time.
    assert_eq!(feedback.reviewed.len(), 3);
    assert!(feedback.reviewed.iter().all(|(s, _)| s == "hello there"));
}

#[tokio::test]
async fn run_drains_a_source_in_order_with_counts() {
    let mut runtime = SignalRuntime::admit(&fast_config()).unwrap();
    let mut source = Script::new(&["one", "", "two", "   ", "three"]);
    let mut feedback = NoFeedback;

    let summary = runtime.run(&mut source, &mut feedback).await;
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.allowed, 3);
    assert_eq!(summary.frozen, 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.cooldowns, 0);

    let trace: Vec<String> = runtime.engine().essence().trace().map(String::from).collect();
    assert_eq!(trace, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn run_counts_cooldowns_from_drift() {
    let mut runtime = SignalRuntime::admit(&fast_config()).unwrap();
    let lines: Vec<&str> = std::iter::repeat("echo").take(16).collect();
    let mut source = Script::new(&lines);
    let mut feedback = NoFeedback;

    let summary = runtime.run(&mut source, &mut feedback).await;
    assert_eq!(summary.processed, 16);
    assert_eq!(summary.allowed, 16);
    assert_eq!(summary.cooldowns, 1);
}

// ============================================================
// Config — loading from disk
// ============================================================

#[test]
fn config_loads_from_file_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signalgate.toml");
    std::fs::write(
        &path,
        "[birth]\nbehavior_ok = true\nformat_ok = true\n\n[engine.decision]\ncooldown_ms = 25\n",
    )
    .unwrap();

    let config = SignalgateConfig::load(&path);
    assert!(config.birth.behavior_ok);
    assert_eq!(config.engine.decision.cooldown_ms, 25);
    assert_eq!(config.engine.drift.window_capacity, 50);

    let missing = SignalgateConfig::load(&dir.path().join("nope.toml"));
    assert!(!missing.birth.behavior_ok);
    assert_eq!(missing.engine.decision.cooldown_ms, 2_000);
}
