//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{AudioBuffer, BackendLimits};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Transcriber process failed: {0}")]
    ProcessFailed(String),
}

/// Port for audio transcription.
///
/// Transcription options (language, prompt, temperature) are fixed at adapter
/// construction from the loaded config.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe captured audio to text.
    ///
    /// # Returns
    /// The transcribed text (possibly empty) or an error
    async fn transcribe(&self, audio: &AudioBuffer) -> Result<String, TranscriptionError>;

    /// Recording ceilings this backend can accept
    fn limits(&self) -> BackendLimits;
}
