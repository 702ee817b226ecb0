//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod delivery;
pub mod status;
pub mod transcriber;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use capture::{AudioCapture, CaptureError, LimitCallback};
pub use config::ConfigStore;
pub use delivery::{DeliveryError, TextDelivery};
pub use status::{HotkeySwitch, StatusSink};
pub use transcriber::{Transcriber, TranscriptionError};
