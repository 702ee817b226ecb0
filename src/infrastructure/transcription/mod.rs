//! Transcription backend adapters

mod wav;
mod whisper_api;
mod whisper_cli;

use std::sync::Arc;

use thiserror::Error;

pub use wav::encode_wav;
pub use whisper_api::{WhisperApiOptions, WhisperApiTranscriber};
pub use whisper_cli::WhisperCliTranscriber;

use crate::application::ports::Transcriber;
use crate::domain::config::{AppConfig, BackendKind};

/// Why a backend could not be constructed at startup
#[derive(Debug, Clone, Error)]
pub enum BackendBuildError {
    #[error("Missing API key. Set KEYSCRIBE_API_KEY or configure via 'keyscribe config set api_key <key>'")]
    MissingApiKey,
}

/// Build the transcriber the config asks for.
pub fn build_transcriber(config: &AppConfig) -> Result<Arc<dyn Transcriber>, BackendBuildError> {
    match config.backend_or_default() {
        BackendKind::Api => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or(BackendBuildError::MissingApiKey)?;
            let options = WhisperApiOptions {
                language: config.language.clone(),
                prompt: config.prompt.clone(),
                temperature: config.temperature,
            };
            Ok(Arc::new(WhisperApiTranscriber::new(api_key, options)))
        }
        BackendKind::Local => Ok(Arc::new(WhisperCliTranscriber::new(
            config.local_command_or_default(),
            config.local_model_path.clone(),
            config.language.clone(),
        ))),
    }
}
