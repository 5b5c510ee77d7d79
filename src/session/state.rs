//! Per-session counters and cursor

use crate::core::types::SlideIndex;
use serde::Serialize;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    ShuttingDown,
}

/// State owned by one voice-control session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Zero-based slide the next command applies to
    pub current_slide_index: SlideIndex,
    pub commands_processed: u64,
    pub successful_commands: u64,
    pub ai_generations: u64,
    pub is_running: bool,
    pub phase: SessionPhase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of processed commands that succeeded
    ///
    /// Processed is floored at one, so a fresh session reports 0.0.
    pub fn success_rate(&self) -> f64 {
        self.successful_commands as f64 / self.commands_processed.max(1) as f64 * 100.0
    }

    /// Keep the cursor on an existing slide, or at 0 for an empty deck
    pub fn clamp_cursor(&mut self, slide_count: usize) {
        self.current_slide_index = self
            .current_slide_index
            .min(slide_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut state = SessionState::new();
        assert_eq!(state.success_rate(), 0.0);

        state.commands_processed = 4;
        state.successful_commands = 3;
        assert!((state.success_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_cursor() {
        let mut state = SessionState {
            current_slide_index: 4,
            ..SessionState::default()
        };
        state.clamp_cursor(3);
        assert_eq!(state.current_slide_index, 2);

        state.clamp_cursor(0);
        assert_eq!(state.current_slide_index, 0);
    }

    #[test]
    fn test_new_session_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.is_running);
    }
}
