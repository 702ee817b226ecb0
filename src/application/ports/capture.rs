//! Audio capture port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::audio::AudioBuffer;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Audio device {0} not found")]
    DeviceNotFound(usize),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Callback invoked once when a running capture reaches its byte ceiling
pub type LimitCallback = Arc<dyn Fn() + Send + Sync>;

/// Port for hotkey-controlled audio capture.
///
/// A capture runs until stopped; the caller bounds it with `max_bytes` and a
/// wall-clock timer of its own. `stop` is idempotent: stopping an inactive
/// capture returns an empty buffer.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Start capturing from the input device.
    ///
    /// # Arguments
    /// * `max_bytes` - Ceiling on captured audio, in canonical-format bytes
    /// * `on_limit` - Invoked at most once when the ceiling is reached
    async fn start(
        &self,
        max_bytes: usize,
        on_limit: Option<LimitCallback>,
    ) -> Result<(), CaptureError>;

    /// Stop capturing and return everything captured so far.
    async fn stop(&self) -> AudioBuffer;

    /// Check if currently capturing
    fn is_capturing(&self) -> bool;
}
