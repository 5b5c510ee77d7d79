//! User-facing notices

/// Where confirmations and errors are reported
pub trait Feedback {
    /// A short per-command notice
    fn notify(&self, message: &str);

    /// Longer text the user asked to see, such as the command list
    fn display(&self, text: &str);
}

/// Prints to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn notify(&self, message: &str) {
        println!("🔊 {}", message);
    }

    fn display(&self, text: &str) {
        println!("{}", text);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn notify(&self, _message: &str) {}

    fn display(&self, _text: &str) {}
}
