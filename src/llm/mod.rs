//! AI text generation
//!
//! `client` talks HTTP to an LLM, `generator` bounds it behind a blocking
//! trait, and `gateway` is the fail-open surface the session uses.

pub mod client;
pub mod context;
pub mod gateway;
pub mod generator;
pub mod parser;
pub mod prompts;

pub use context::DeckContext;
pub use gateway::AiGateway;
pub use generator::{HttpGenerator, TextGenerator};
pub use parser::{GeneratedContent, SlideKind};
