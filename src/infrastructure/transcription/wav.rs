//! In-memory WAV encoding for transcription uploads

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::domain::audio::{AudioBuffer, CHANNELS, SAMPLE_RATE};

/// Encode a captured buffer as a 16-bit PCM WAV payload
pub fn encode_wav(audio: &AudioBuffer) -> Result<Vec<u8>, String> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| format!("WAV writer init failed: {}", e))?;
        for &sample in audio.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| format!("WAV write failed: {}", e))?;
        }
        writer
            .finalize()
            .map_err(|e| format!("WAV finalize failed: {}", e))?;
    }

    Ok(cursor.into_inner())
}
