//! Audio domain types
//!
//! Everything downstream of capture works on 16 kHz mono 16-bit PCM; capture
//! adapters resample whatever the device delivers into this format.

use std::time::Duration;

/// Canonical sample rate for captured audio
pub const SAMPLE_RATE: u32 = 16_000;
/// Canonical channel count
pub const CHANNELS: u16 = 1;
/// Bytes per sample at 16-bit depth
pub const BYTES_PER_SAMPLE: usize = 2;
/// Bytes per second of canonical audio
pub const BYTES_PER_SECOND: usize = SAMPLE_RATE as usize * BYTES_PER_SAMPLE;

/// Captured audio in the canonical format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
}

impl AudioBuffer {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Size of the raw PCM payload in bytes
    pub fn byte_len(&self) -> usize {
        self.samples.len() * BYTES_PER_SAMPLE
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / SAMPLE_RATE as f64)
    }
}

/// Per-backend ceilings on a single recording.
///
/// Capture is stopped automatically when either ceiling is reached, so a
/// forgotten toggle session cannot grow past what the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendLimits {
    pub max_duration: Duration,
    pub max_bytes: usize,
}

/// Upload ceiling of the Whisper API, minus headroom for the WAV header and
/// multipart framing
const WHISPER_API_MAX_BYTES: usize = 24 * 1024 * 1024;

impl BackendLimits {
    /// Limits for the hosted Whisper API. The duration ceiling is derived
    /// from the byte ceiling at the canonical rate.
    pub fn whisper_api() -> Self {
        Self {
            max_duration: Duration::from_secs((WHISPER_API_MAX_BYTES / BYTES_PER_SECOND) as u64),
            max_bytes: WHISPER_API_MAX_BYTES,
        }
    }

    /// Limits for a local backend, which has no upload ceiling. An hour-long
    /// recording is past any plausible dictation; stop there.
    pub fn local() -> Self {
        Self {
            max_duration: Duration::from_secs(60 * 60),
            max_bytes: 60 * 60 * BYTES_PER_SECOND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_counts_pcm_bytes() {
        let buffer = AudioBuffer::new(vec![0i16; SAMPLE_RATE as usize]);
        assert_eq!(buffer.byte_len(), BYTES_PER_SECOND);
        assert_eq!(buffer.duration(), Duration::from_secs(1));
    }

    #[test]
    fn empty_buffer() {
        let buffer = AudioBuffer::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.byte_len(), 0);
        assert_eq!(buffer.duration(), Duration::ZERO);
    }

    #[test]
    fn whisper_api_duration_derives_from_bytes() {
        let limits = BackendLimits::whisper_api();
        let expected = (limits.max_bytes / BYTES_PER_SECOND) as u64;
        assert_eq!(limits.max_duration, Duration::from_secs(expected));
        // ~13 minutes of 16 kHz mono audio fits in 24 MiB.
        assert!(limits.max_duration > Duration::from_secs(700));
    }
}
