//! Audio cue infrastructure adapters
//!
//! Provides audio feedback when a recording session starts or stops.

mod rodio;

use std::sync::Arc;

pub use rodio::RodioAudioCue;

use crate::application::ports::AudioCue;

/// Create the audio cue adapter, or None when feedback is disabled
pub fn create_audio_cue(enabled: bool) -> Option<Arc<dyn AudioCue>> {
    enabled.then(|| Arc::new(RodioAudioCue::new()) as Arc<dyn AudioCue>)
}
