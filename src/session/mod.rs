//! Voice-control session
//!
//! Input source -> VoiceSession (enhance, parse, validate, execute) -> deck,
//! with notices going to a Feedback sink.

pub mod engine;
pub mod feedback;
pub mod input;
pub mod state;

pub use engine::{SessionStatus, StopHandle, VoiceSession};
pub use feedback::{ConsoleFeedback, Feedback, SilentFeedback};
pub use input::{InputSource, LineSource, ScriptedSource};
pub use state::{SessionPhase, SessionState};
