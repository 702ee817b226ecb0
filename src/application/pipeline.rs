//! Capture-to-text pipeline
//!
//! Runs one finished recording through transcription and delivery. The
//! pipeline never panics the session: every failure is folded into the
//! outcome so the orchestrator always returns to idle.

use std::sync::Arc;

use crate::domain::audio::AudioBuffer;
use crate::domain::session::TranscriptionRecord;

use super::ports::{TextDelivery, Transcriber};

/// Result of one pipeline run
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// The finished transcription, when there was speech to transcribe
    pub record: Option<TranscriptionRecord>,
    /// User-facing error message, if any step failed
    pub error: Option<String>,
}

impl PipelineOutcome {
    fn empty() -> Self {
        Self::default()
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            record: None,
            error: Some(message.into()),
        }
    }
}

/// The transcribe-and-deliver stage behind a recording session.
///
/// `transcriber` is None when no backend could be constructed at startup
/// (e.g. missing API key); sessions still record but finish with an error so
/// the user learns why nothing was inserted.
pub struct TranscriptionPipeline {
    transcriber: Option<Arc<dyn Transcriber>>,
    delivery: Arc<dyn TextDelivery>,
}

impl TranscriptionPipeline {
    pub fn new(transcriber: Option<Arc<dyn Transcriber>>, delivery: Arc<dyn TextDelivery>) -> Self {
        Self {
            transcriber,
            delivery,
        }
    }

    /// Process one finished recording.
    ///
    /// An empty buffer or an empty transcript is a quiet success, not an
    /// error. A delivery failure is reported but the transcript is still
    /// returned so it reaches the history.
    pub async fn run(&self, audio: AudioBuffer) -> PipelineOutcome {
        let Some(transcriber) = &self.transcriber else {
            return PipelineOutcome::failed(
                "No transcription backend available. Check your configuration.",
            );
        };

        if audio.is_empty() {
            return PipelineOutcome::empty();
        }

        let duration_secs = audio.duration().as_secs_f64();
        let text = match transcriber.transcribe(&audio).await {
            Ok(text) => text,
            Err(e) => return PipelineOutcome::failed(format!("Transcription failed: {e}")),
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return PipelineOutcome::empty();
        }

        let error = match self.delivery.deliver(&text).await {
            Ok(()) => None,
            Err(e) => Some(format!("Failed to insert text: {e}")),
        };

        PipelineOutcome {
            record: Some(TranscriptionRecord::new(text, duration_secs)),
            error,
        }
    }
}
