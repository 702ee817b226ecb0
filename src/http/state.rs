use std::sync::{Arc, Mutex as StdMutex};

use crate::application::ports::{HotkeySwitch, StatusSink};
use crate::domain::session::{
    SessionStatus, TranscriptionHistory, TranscriptionRecord,
};

/// Shared application state for HTTP handlers.
///
/// Doubles as the orchestrator's status sink: the event loop writes state
/// through the StatusSink impl, handlers read it.
#[derive(Clone)]
pub struct DashboardState {
    status: Arc<StdMutex<SessionStatus>>,
    last_error: Arc<StdMutex<Option<String>>>,
    history: Arc<StdMutex<TranscriptionHistory>>,
    pub hotkeys: HotkeySwitch,
}

impl DashboardState {
    pub fn new(history_limit: usize, hotkeys: HotkeySwitch) -> Self {
        Self {
            status: Arc::new(StdMutex::new(SessionStatus::Idle)),
            last_error: Arc::new(StdMutex::new(None)),
            history: Arc::new(StdMutex::new(TranscriptionHistory::new(history_limit))),
            hotkeys,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status.lock().map(|s| *s).unwrap_or_default()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|e| e.clone())
    }

    pub fn records(&self) -> Vec<TranscriptionRecord> {
        self.history
            .lock()
            .map(|h| h.records().to_vec())
            .unwrap_or_default()
    }

    pub fn clear_history(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }
}

impl StatusSink for DashboardState {
    fn status_changed(&self, status: SessionStatus) {
        if let Ok(mut current) = self.status.lock() {
            *current = status;
        }
        // A fresh session clears the stale error banner.
        if status == SessionStatus::Recording {
            if let Ok(mut error) = self.last_error.lock() {
                *error = None;
            }
        }
    }

    fn transcription_complete(&self, record: &TranscriptionRecord) {
        if let Ok(mut history) = self.history.lock() {
            history.push(record.clone());
        }
    }

    fn pipeline_error(&self, message: &str) {
        if let Ok(mut error) = self.last_error.lock() {
            *error = Some(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_updates_are_visible_to_readers() {
        let state = DashboardState::new(10, HotkeySwitch::new());

        state.status_changed(SessionStatus::Recording);
        assert_eq!(state.status(), SessionStatus::Recording);

        state.transcription_complete(&TranscriptionRecord::new("hello", 1.5));
        assert_eq!(state.records()[0].text, "hello");

        state.pipeline_error("boom");
        assert_eq!(state.last_error(), Some("boom".to_string()));
    }

    #[test]
    fn new_recording_clears_the_last_error() {
        let state = DashboardState::new(10, HotkeySwitch::new());
        state.pipeline_error("old failure");
        state.status_changed(SessionStatus::Recording);
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn clear_history_empties_records() {
        let state = DashboardState::new(10, HotkeySwitch::new());
        state.transcription_complete(&TranscriptionRecord::new("gone", 1.0));
        state.clear_history();
        assert!(state.records().is_empty());
    }
}
