//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rdev, the Whisper backends, and the desktop.

pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod delivery;
pub mod input;
pub mod transcription;

// Re-export adapters
pub use audio_cue::{create_audio_cue, RodioAudioCue};
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use delivery::{build_delivery, PasteDelivery, TypingDelivery};
pub use input::spawn_listener;
pub use transcription::{
    build_transcriber, BackendBuildError, WhisperApiOptions, WhisperApiTranscriber,
    WhisperCliTranscriber,
};
