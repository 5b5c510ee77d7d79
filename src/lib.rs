//! Voice Deck - voice-command-driven presentation editor

pub mod command;
pub mod core;
pub mod deck;
pub mod llm;
pub mod session;
