//! Status reporting port and the hotkey enable switch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::session::{SessionStatus, TranscriptionRecord};

/// Port for publishing orchestrator state to observers (terminal, dashboard).
///
/// Implementations must be cheap and non-blocking; the orchestrator calls
/// these inline from its event loop.
pub trait StatusSink: Send + Sync {
    /// The session moved to a new status
    fn status_changed(&self, status: SessionStatus);

    /// A transcription finished successfully
    fn transcription_complete(&self, record: &TranscriptionRecord);

    /// A pipeline step failed; the message is user-facing
    fn pipeline_error(&self, message: &str);
}

/// Shared on/off switch for hotkey handling.
///
/// When off, key-down activations (start or stop-toggle) are dropped, but a
/// held push-to-talk release is still honored so a session can always end.
#[derive(Debug, Clone)]
pub struct HotkeySwitch {
    enabled: Arc<AtomicBool>,
}

impl HotkeySwitch {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Flip the switch and return the new value
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl Default for HotkeySwitch {
    fn default() -> Self {
        Self::new()
    }
}
