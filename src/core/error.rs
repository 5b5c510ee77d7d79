use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Slide index {index} is out of range (deck has {count} slides)")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("Cannot delete the last remaining slide")]
    LastSlide,

    #[error("Layout index {0} is out of range")]
    LayoutOutOfRange(usize),

    #[error("Slide limit of {0} reached")]
    SlideLimit(usize),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid chart data: {0}")]
    InvalidChartData(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("LLM request timed out after {0}s")]
    LlmTimeout(u64),

    #[error("AI {0} is not available")]
    AiUnavailable(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
