//! Local whisper-cli transcriber adapter
//!
//! Shells out to a whisper.cpp-style CLI: the capture is written to a temp
//! WAV file and the transcript is read from stdout.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::audio::{AudioBuffer, BackendLimits};

use super::wav::encode_wav;

/// Temp file for one transcription run
struct TempWavFile {
    path: PathBuf,
}

impl TempWavFile {
    fn new() -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let path = std::env::temp_dir().join(format!("keyscribe-{}.wav", timestamp));
        Self { path }
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TempWavFile {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Local CLI transcriber
pub struct WhisperCliTranscriber {
    command: String,
    model_path: Option<String>,
    language: Option<String>,
}

impl WhisperCliTranscriber {
    pub fn new(
        command: impl Into<String>,
        model_path: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            model_path,
            language,
        }
    }

    /// Build CLI args for one run
    fn build_args(&self, wav_path: &std::path::Path) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(model) = &self.model_path {
            args.push("--model".to_string());
            args.push(model.clone());
        }
        if let Some(language) = &self.language {
            args.push("--language".to_string());
            args.push(language.clone());
        }

        // Plain text on stdout, no timestamps
        args.extend([
            "--no-timestamps".to_string(),
            "--no-prints".to_string(),
            "--file".to_string(),
            wav_path.to_string_lossy().to_string(),
        ]);

        args
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio: &AudioBuffer) -> Result<String, TranscriptionError> {
        let wav = encode_wav(audio).map_err(TranscriptionError::ProcessFailed)?;

        let temp_file = TempWavFile::new();
        fs::write(temp_file.path(), &wav)
            .await
            .map_err(|e| TranscriptionError::ProcessFailed(format!("temp file: {}", e)))?;

        let args = self.build_args(temp_file.path());
        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscriptionError::ProcessFailed(format!(
                        "'{}' not found. Install whisper.cpp or set local_command.",
                        self.command
                    ))
                } else {
                    TranscriptionError::ProcessFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriptionError::ProcessFailed(format!(
                "{} exited with error: {}",
                self.command,
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(text)
    }

    fn limits(&self) -> BackendLimits {
        BackendLimits::local()
    }
}
