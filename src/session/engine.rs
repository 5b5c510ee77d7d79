//! Voice-control session: the single mutator of a deck
//!
//! A session owns its deck, parser, AI gateway and state. Commands are
//! processed one at a time to completion; nothing that goes wrong inside a
//! command escapes as an error.

use crate::command::{validate_command, CommandExecutor, CommandParser};
use crate::core::config::AppConfig;
use crate::core::types::LAYOUT_TITLE;
use crate::deck::{with_deck_extension, SlideDeck};
use crate::llm::AiGateway;
use crate::session::feedback::{Feedback, SilentFeedback};
use crate::session::input::{InputSource, ScriptedSource};
use crate::session::state::{SessionPhase, SessionState};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Title of the slide added when a session starts on an empty deck
pub const WELCOME_TITLE: &str = "AI-Powered Voice Presentation";

/// Longest a continuous run waits on input before rechecking for a stop
const STOP_POLL: Duration = Duration::from_millis(250);

/// Asks a running session to stop from outside its thread
///
/// Cloned handles share one flag. The session notices the request within
/// one input poll and then shuts down normally.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Snapshot reported by [`VoiceSession::get_status`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub is_running: bool,
    /// One-based, for display
    pub current_slide: usize,
    pub total_slides: usize,
    pub commands_processed: u64,
    pub successful_commands: u64,
    pub ai_generations: u64,
    pub presentation_name: String,
    pub feedback_enabled: bool,
    pub ai_enabled: bool,
}

pub struct VoiceSession<D: SlideDeck> {
    deck: D,
    config: AppConfig,
    parser: CommandParser,
    ai: AiGateway,
    input: Box<dyn InputSource>,
    feedback: Box<dyn Feedback>,
    state: SessionState,
    stop: StopHandle,
}

impl<D: SlideDeck> VoiceSession<D> {
    /// Create an idle session
    ///
    /// The gateway is ignored when `config.enable_ai` is off. The session
    /// starts with no input and silent feedback; see [`Self::with_input`]
    /// and [`Self::with_feedback`].
    pub fn new(deck: D, config: AppConfig, ai: AiGateway) -> Self {
        let ai = if config.enable_ai {
            ai
        } else {
            AiGateway::unavailable()
        };
        if config.enable_ai && !ai.is_available() {
            tracing::warn!("AI enabled but no generator configured - running without AI");
        }

        Self {
            deck,
            config,
            parser: CommandParser::new(),
            ai,
            input: Box::new(ScriptedSource::default()),
            feedback: Box::new(SilentFeedback),
            state: SessionState::new(),
            stop: StopHandle::default(),
        }
    }

    pub fn with_input(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = input;
        self
    }

    pub fn with_feedback(mut self, feedback: Box<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn deck(&self) -> &D {
        &self.deck
    }

    pub fn into_deck(self) -> D {
        self.deck
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle for stopping [`Self::run_continuous`] from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_available()
    }

    fn notify(&self, message: &str) {
        if self.config.enable_feedback {
            self.feedback.notify(message);
        }
    }

    /// Enter the running state
    ///
    /// An empty deck gets a title slide first, so commands always have a
    /// slide to work on.
    pub fn start(&mut self) {
        if self.state.phase == SessionPhase::Running {
            return;
        }

        if self.deck.slide_count() == 0 {
            let subtitle = format!(
                "Created on {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            );
            if let Err(e) = self.deck.add_slide(LAYOUT_TITLE, WELCOME_TITLE, Some(&subtitle)) {
                tracing::error!("Could not add the initial slide: {}", e);
            }
        }

        self.state.phase = SessionPhase::Running;
        self.state.is_running = true;
        self.state.clamp_cursor(self.deck.slide_count());
        tracing::info!(
            "Voice control started (AI {})",
            if self.ai_enabled() { "enabled" } else { "disabled" }
        );
        self.notify("Voice control system ready");
    }

    /// Run one recognized text through enhance, parse, validate and execute
    ///
    /// Returns whether the command succeeded.
    pub fn process_command(&mut self, text: &str) -> bool {
        self.state.commands_processed += 1;
        tracing::info!("Processing voice command: {}", text);

        let working = if self.ai.is_available() {
            self.ai.enhance(text)
        } else {
            text.to_string()
        };

        let Some(command) = self.parser.parse(&working) else {
            tracing::info!("No command matched: {}", working);
            self.notify(&format!("Command not understood: {}", working));
            return false;
        };
        tracing::info!(
            "Parsed command: {} {:?} (confidence {:.1})",
            command.intent(),
            command.action.parameter_names(),
            command.confidence
        );

        if let Err(e) = validate_command(Some(&command)) {
            tracing::warn!("Validation failed: {}", e);
            self.notify(&e.to_string());
            return false;
        }

        let executor = CommandExecutor::new(&self.ai, &self.config);
        let result = executor.execute(&mut self.deck, &command, self.state.current_slide_index);

        self.state.ai_generations += u64::from(result.ai_generations);
        if let Some(output) = &result.output {
            self.feedback.display(output);
        }
        if result.success {
            self.state.successful_commands += 1;
            if let Some(index) = result.current_slide {
                self.state.current_slide_index = index;
            }
        }
        self.state.clamp_cursor(self.deck.slide_count());
        self.notify(&result.message);

        if result.stop {
            tracing::info!("Stopping voice control...");
            self.state.is_running = false;
        }

        result.success
    }

    /// One blocking listen, then process whatever was heard
    ///
    /// Hearing nothing is not a command: it returns false and leaves the
    /// statistics alone.
    pub fn process_single_command(&mut self, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or_else(|| self.config.listen_timeout());
        match self.input.listen_once(timeout) {
            Some(text) => self.process_command(&text),
            None => {
                tracing::debug!("No command received");
                false
            }
        }
    }

    /// Listen and process until stopped, interrupted through a
    /// [`StopHandle`], or the input closes, then shut down
    pub fn run_continuous(&mut self) -> Option<PathBuf> {
        self.start();
        let timeout = self.config.listen_timeout().min(STOP_POLL);

        while self.state.is_running {
            if self.stop.is_stop_requested() {
                tracing::info!("Stop requested");
                break;
            }
            match self.input.listen_once(timeout) {
                Some(text) => {
                    self.process_command(&text);
                }
                None if self.input.is_closed() => {
                    tracing::info!("Input closed");
                    break;
                }
                None => {}
            }
        }

        self.shutdown()
    }

    /// Stop input, autosave and report statistics
    ///
    /// Returns the autosave path when one was written.
    pub fn shutdown(&mut self) -> Option<PathBuf> {
        tracing::info!("Shutting down voice control system...");
        self.state.phase = SessionPhase::ShuttingDown;
        self.state.is_running = false;
        self.input.stop();

        let saved = if self.config.auto_save {
            self.autosave()
        } else {
            None
        };

        tracing::info!("Session statistics:");
        tracing::info!("  Commands processed: {}", self.state.commands_processed);
        tracing::info!("  Successful commands: {}", self.state.successful_commands);
        tracing::info!("  Success rate: {:.1}%", self.state.success_rate());
        tracing::info!("  Total slides: {}", self.deck.slide_count());
        if self.config.enable_ai {
            tracing::info!("  AI generations: {}", self.state.ai_generations);
        }

        self.notify("Voice control system stopped");
        self.state.phase = SessionPhase::Idle;
        tracing::info!("Voice control system shutdown complete");
        saved
    }

    fn autosave(&self) -> Option<PathBuf> {
        let name = format!(
            "{}_{}",
            self.config.presentation_name,
            chrono::Utc::now().timestamp()
        );
        let path = self.config.output_dir.join(with_deck_extension(&name));
        match self.deck.save(&path) {
            Ok(written) => {
                tracing::info!("Auto-saved presentation as: {}", written.display());
                Some(written)
            }
            Err(e) => {
                tracing::error!("Auto-save failed: {}", e);
                None
            }
        }
    }

    pub fn get_status(&self) -> SessionStatus {
        SessionStatus {
            is_running: self.state.is_running,
            current_slide: self.state.current_slide_index + 1,
            total_slides: self.deck.slide_count(),
            commands_processed: self.state.commands_processed,
            successful_commands: self.state.successful_commands,
            ai_generations: self.state.ai_generations,
            presentation_name: self.config.presentation_name.clone(),
            feedback_enabled: self.config.enable_feedback,
            ai_enabled: self.ai_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Presentation;

    fn config() -> AppConfig {
        AppConfig {
            auto_save: false,
            enable_feedback: false,
            ..AppConfig::default()
        }
    }

    fn session() -> VoiceSession<Presentation> {
        VoiceSession::new(Presentation::default(), config(), AiGateway::unavailable())
    }

    #[test]
    fn test_start_adds_title_slide() {
        let mut session = session();
        session.start();
        assert_eq!(session.deck().slide_count(), 1);
        assert_eq!(session.deck().slide_title(0).as_deref(), Some(WELCOME_TITLE));
        assert_eq!(session.state().phase, SessionPhase::Running);
        assert!(session.state().is_running);
    }

    #[test]
    fn test_unmatched_text_counts_as_failure() {
        let mut session = session();
        session.start();
        assert!(!session.process_command("sing me a song"));
        assert_eq!(session.state().commands_processed, 1);
        assert_eq!(session.state().successful_commands, 0);
    }

    #[test]
    fn test_validation_failure() {
        let mut session = session();
        session.start();
        // fuzzy delete has no slide number
        assert!(!session.process_command("delete"));
        assert_eq!(session.deck().slide_count(), 1);
    }

    #[test]
    fn test_stop_listening() {
        let mut session = session();
        session.start();
        assert!(session.process_command("stop listening"));
        assert!(!session.state().is_running);
    }

    #[test]
    fn test_single_command_without_speech() {
        let mut session = session();
        session.start();
        assert!(!session.process_single_command(Some(Duration::from_millis(10))));
        assert_eq!(session.state().commands_processed, 0);
    }

    #[test]
    fn test_status_is_one_based() {
        let mut session = session();
        session.start();
        let status = session.get_status();
        assert_eq!(status.current_slide, 1);
        assert_eq!(status.total_slides, 1);
        assert!(!status.ai_enabled);
        assert_eq!(status.presentation_name, "voice_presentation");
    }

    #[test]
    fn test_stop_handle_shared_between_clones() {
        let session = session();
        let handle = session.stop_handle();
        assert!(!session.stop_handle().is_stop_requested());
        handle.request_stop();
        assert!(session.stop_handle().is_stop_requested());
    }

    #[test]
    fn test_shutdown_returns_to_idle() {
        let mut session = session();
        session.start();
        assert_eq!(session.shutdown(), None);
        assert_eq!(session.state().phase, SessionPhase::Idle);
        assert!(!session.state().is_running);
    }
}
