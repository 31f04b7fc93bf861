//! Signalgate — one-time admission, then a stream of classified signals
//!
//! Usage:
//!   signalgate --input signals.txt --feedback
//!   tail -f events.log | signalgate
//!
//! Birth metadata comes from the [birth] section of signalgate.toml (or
//! the CLI overrides); a failed verification exits before any signal is
//! read.

use clap::Parser;
use signalgate::feedback::PromptFeedback;
use signalgate::source::{FileSource, StdinSource};
use signalgate_engine::config::SignalgateConfig;
use signalgate_engine::runtime::{FeedbackCollaborator, NoFeedback, SignalRuntime, SignalSource};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "signalgate",
    about = "One-time admission trust gateway for signal streams"
)]
struct Cli {
    /// Signal input: a file path, or "-" for stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Path to config file (TOML). Default: ./signalgate.toml
    #[arg(long)]
    config: Option<String>,

    /// Dump default config as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Ask for a yes/no verdict after every decision
    #[arg(long)]
    feedback: bool,

    /// Override [birth] behavior_ok
    #[arg(long)]
    behavior_ok: Option<bool>,

    /// Override [birth] format_ok
    #[arg(long)]
    format_ok: Option<bool>,

    /// Override [birth] inject_attempt
    #[arg(long)]
    inject_attempt: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.dump_config {
        println!("{}", SignalgateConfig::default().to_toml());
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signalgate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("signalgate.toml"));
    let mut config = SignalgateConfig::load(&config_path);

    if let Some(v) = cli.behavior_ok {
        config.birth.behavior_ok = v;
    }
    if let Some(v) = cli.format_ok {
        config.birth.format_ok = v;
    }
    if let Some(v) = cli.inject_attempt {
        config.birth.inject_attempt = v;
    }

    println!("╔══════════════════════════════════════════════════╗");
    println!(
        "║  SIGNALGATE v{}  —  one-time admission gateway  ║",
        env!("CARGO_PKG_VERSION")
    );
    println!("║  assimilate → decide → feedback, one at a time   ║");
    println!("╚══════════════════════════════════════════════════╝");

    // Birth happens exactly once; failure means no signal is processed.
    let mut runtime = SignalRuntime::admit(&config)?;
    tracing::info!("Admitted with token {}", runtime.token());

    let reading_stdin = cli.input == "-";
    let mut source: Box<dyn SignalSource> = if reading_stdin {
        Box::new(StdinSource::new())
    } else {
        Box::new(FileSource::open(Path::new(&cli.input))?)
    };

    let mut collaborator: Box<dyn FeedbackCollaborator> = if cli.feedback && !reading_stdin {
        Box::new(PromptFeedback)
    } else {
        if cli.feedback && reading_stdin {
            tracing::warn!("Interactive feedback disabled: signals arrive on stdin");
        }
        Box::new(NoFeedback)
    };

    let summary = runtime.run(source.as_mut(), collaborator.as_mut()).await;

    println!(
        "{} processed, {} allowed, {} frozen, {} skipped, {} cooldowns",
        summary.processed, summary.allowed, summary.frozen, summary.skipped, summary.cooldowns
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&runtime.engine().essence_snapshot())?
    );

    Ok(())
}
