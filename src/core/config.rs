//! Application configuration with documented defaults
//!
//! Values come from an optional TOML file; anything missing falls back to
//! the defaults below. LLM credentials are read from the environment by
//! `LlmClient::from_env` and never live in this file.

use crate::core::error::{DeckError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a voice-control session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // === PRESENTATION ===
    /// Base name used for `save` without a filename and for autosaves
    pub presentation_name: String,

    /// Directory that saved and autosaved decks are written to
    pub output_dir: PathBuf,

    /// Write a timestamped copy of the deck when the session shuts down
    pub auto_save: bool,

    /// Hard cap on slides per deck
    ///
    /// `add_slide` fails once the deck holds this many slides.
    pub max_slide_count: usize,

    // === FEEDBACK ===
    /// Emit user-facing notices for every command
    pub enable_feedback: bool,

    /// Seconds a single blocking listen waits for an utterance
    pub listen_timeout_secs: u64,

    // === AI ===
    /// Use the text-generation capability when one is configured
    pub enable_ai: bool,

    /// Upper bound on a single AI request, in seconds
    ///
    /// A request that runs longer is abandoned and treated as a failure,
    /// so a slow backend delays one command at most this long.
    pub ai_timeout_secs: u64,

    /// Sampling temperature passed to the backend (0.0 - 2.0)
    pub ai_temperature: f32,

    /// Maximum tokens requested per generation
    pub ai_max_tokens: u32,

    /// Language generated slide content should be written in
    pub ai_content_language: String,

    // === LOGGING ===
    /// `tracing_subscriber` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            presentation_name: "voice_presentation".into(),
            output_dir: PathBuf::from("."),
            auto_save: true,
            max_slide_count: 50,

            enable_feedback: true,
            listen_timeout_secs: 10,

            enable_ai: true,
            ai_timeout_secs: 20,
            ai_temperature: 0.7,
            ai_max_tokens: 1000,
            ai_content_language: "english".into(),

            log_filter: "voice_deck=info".into(),
        }
    }
}

impl AppConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file, falling back to defaults for missing keys
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeckError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.ai_temperature) {
            return Err(DeckError::ConfigError(format!(
                "ai_temperature ({}) must be between 0.0 and 2.0",
                self.ai_temperature
            )));
        }

        if self.ai_max_tokens == 0 {
            return Err(DeckError::ConfigError("ai_max_tokens must be positive".into()));
        }

        if self.max_slide_count == 0 {
            return Err(DeckError::ConfigError(
                "max_slide_count must be positive".into(),
            ));
        }

        if self.ai_timeout_secs == 0 {
            return Err(DeckError::ConfigError(
                "ai_timeout_secs must be positive".into(),
            ));
        }

        if self.presentation_name.trim().is_empty() {
            return Err(DeckError::ConfigError(
                "presentation_name must not be empty".into(),
            ));
        }

        Ok(())
    }
}
