//! Hosted Whisper API transcriber adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::audio::{AudioBuffer, BackendLimits};

use super::wav::encode_wav;

/// Whisper model to request
const DEFAULT_MODEL: &str = "whisper-1";

/// OpenAI-compatible API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Transcription options forwarded with every request
#[derive(Debug, Clone, Default)]
pub struct WhisperApiOptions {
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Whisper API transcriber
pub struct WhisperApiTranscriber {
    api_key: String,
    base_url: String,
    options: WhisperApiOptions,
    client: reqwest::Client,
}

impl WhisperApiTranscriber {
    /// Create a new API transcriber with the given key
    pub fn new(api_key: impl Into<String>, options: WhisperApiOptions) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
            options,
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    /// Build the multipart form for one upload
    fn build_form(&self, wav: Vec<u8>) -> Result<Form, TranscriptionError> {
        let file = Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let mut form = Form::new()
            .part("file", file)
            .text("model", DEFAULT_MODEL.to_string());

        if let Some(language) = &self.options.language {
            form = form.text("language", language.clone());
        }
        if let Some(prompt) = &self.options.prompt {
            form = form.text("prompt", prompt.clone());
        }
        if let Some(temperature) = self.options.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        Ok(form)
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(&self, audio: &AudioBuffer) -> Result<String, TranscriptionError> {
        let wav = encode_wav(audio).map_err(TranscriptionError::RequestFailed)?;
        let form = self.build_form(wav)?;

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, message
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        Ok(body.text)
    }

    fn limits(&self) -> BackendLimits {
        BackendLimits::whisper_api()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_targets_transcriptions_endpoint() {
        let transcriber =
            WhisperApiTranscriber::new("test-key", WhisperApiOptions::default());
        assert_eq!(
            transcriber.api_url(),
            "https://api.openai.com/v1/audio/transcriptions"
        );
    }

    #[test]
    fn base_url_override() {
        let transcriber = WhisperApiTranscriber::new("key", WhisperApiOptions::default())
            .with_base_url("http://127.0.0.1:9999/v1");
        assert_eq!(
            transcriber.api_url(),
            "http://127.0.0.1:9999/v1/audio/transcriptions"
        );
    }

    #[test]
    fn form_builds_with_all_options() {
        let transcriber = WhisperApiTranscriber::new(
            "key",
            WhisperApiOptions {
                language: Some("en".to_string()),
                prompt: Some("dictation".to_string()),
                temperature: Some(0.2),
            },
        );
        assert!(transcriber.build_form(vec![0u8; 16]).is_ok());
    }

    #[test]
    fn limits_match_the_api_ceiling() {
        let transcriber =
            WhisperApiTranscriber::new("key", WhisperApiOptions::default());
        assert_eq!(transcriber.limits(), BackendLimits::whisper_api());
    }
}
