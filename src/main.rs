//! Voice Deck - Entry Point
//!
//! Sets up logging, loads configuration, builds the optional AI generator,
//! and runs a voice-control session over recognized text.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use voice_deck::command::{help_text, CommandParser};
use voice_deck::core::config::AppConfig;
use voice_deck::core::error::Result;
use voice_deck::deck::Presentation;
use voice_deck::llm::{AiGateway, HttpGenerator};
use voice_deck::session::{ConsoleFeedback, LineSource, StopHandle, VoiceSession};

/// Voice Deck - edit presentations with spoken commands
#[derive(Parser, Debug)]
#[command(name = "voice-deck", version)]
#[command(about = "Edit presentations with natural language voice commands")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a previously saved deck
    #[arg(long, global = true)]
    open: Option<PathBuf>,

    /// Disable AI enhancement and content generation
    #[arg(long, global = true)]
    no_ai: bool,

    /// Disable per-command notices
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Skip the autosave on shutdown
    #[arg(long, global = true)]
    no_autosave: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Read recognized text from stdin, one utterance per line
    Listen,
    /// Run each argument as one command, then shut down
    Exec {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Show how a text parses without executing it
    Parse {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the available voice commands
    Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::new(),
    };
    if cli.no_ai {
        config.enable_ai = false;
    }
    if cli.quiet {
        config.enable_feedback = false;
    }
    if cli.no_autosave {
        config.auto_save = false;
    }
    config.validate()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Mode::Commands => {
            println!("{}", help_text());
            Ok(())
        }
        Mode::Parse { text } => {
            let text = text.join(" ");
            match CommandParser::new().parse(&text) {
                Some(command) => println!("{}", serde_json::to_string_pretty(&command)?),
                None => println!("No command matched: {}", text),
            }
            Ok(())
        }
        Mode::Exec { texts } => {
            let mut session = build_session(cli.open.as_deref(), config)?;
            session.start();
            for text in &texts {
                session.process_command(text);
                if !session.state().is_running {
                    break;
                }
            }
            session.shutdown();
            print_status(&session)
        }
        Mode::Listen => {
            let session = build_session(cli.open.as_deref(), config)?;
            let mut session = session.with_input(Box::new(LineSource::stdin()));
            stop_on_interrupt(session.stop_handle());

            println!("\n=== VOICE DECK ===");
            println!("Say (type) a command per line. 'help' lists commands, 'stop listening' exits.");
            println!();

            session.run_continuous();
            print_status(&session)
        }
    }
}

/// Construct the deck, AI gateway and session before anything runs
///
/// Failures here are fatal: the session never starts.
fn build_session(open: Option<&Path>, config: AppConfig) -> Result<VoiceSession<Presentation>> {
    let deck = match open {
        Some(path) => Presentation::open(path, config.max_slide_count)?,
        None => Presentation::new(config.max_slide_count),
    };

    let ai = if config.enable_ai {
        match HttpGenerator::from_config(&config) {
            Ok(generator) => {
                AiGateway::new(Arc::new(generator), config.ai_content_language.clone())
            }
            Err(e) => {
                tracing::warn!("{} - running without AI", e);
                AiGateway::unavailable()
            }
        }
    } else {
        AiGateway::unavailable()
    };

    Ok(VoiceSession::new(deck, config, ai).with_feedback(Box::new(ConsoleFeedback)))
}

/// Turn Ctrl-C into an orderly stop, so the session still autosaves
fn stop_on_interrupt(handle: StopHandle) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("Cannot watch for Ctrl-C: {}", e);
                return;
            }
        };
        match runtime.block_on(tokio::signal::ctrl_c()) {
            Ok(()) => {
                tracing::info!("Interrupt received - shutting down");
                handle.request_stop();
            }
            Err(e) => tracing::warn!("Cannot watch for Ctrl-C: {}", e),
        }
    });
}

fn print_status(session: &VoiceSession<Presentation>) -> Result<()> {
    println!("\nSession status:");
    println!("{}", serde_json::to_string_pretty(&session.get_status())?);
    Ok(())
}
