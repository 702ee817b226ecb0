//! CLI presenter for output formatting

use colored::*;

use crate::application::ports::StatusSink;
use crate::domain::session::{SessionStatus, TranscriptionRecord};

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual transcription output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print the current session status
    pub fn session_status(&self, status: SessionStatus) {
        match status {
            SessionStatus::Idle => eprintln!("{} Idle", "●".white()),
            SessionStatus::Recording => eprintln!("{} Recording...", "●".red()),
            SessionStatus::Transcribing => eprintln!("{} Transcribing...", "●".yellow()),
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for Presenter {
    fn status_changed(&self, status: SessionStatus) {
        self.session_status(status);
    }

    fn transcription_complete(&self, record: &TranscriptionRecord) {
        self.success(&format!("Transcribed ({:.1}s of audio)", record.duration_secs));
        self.output(&record.text);
    }

    fn pipeline_error(&self, message: &str) {
        self.error(message);
    }
}
