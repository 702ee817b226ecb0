//! Cross-platform audio capture using cpal
//!
//! Captures from the configured input device and delivers 16kHz mono PCM,
//! resampling from the device rate when needed.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::sync::oneshot;
use tokio::time::Duration as TokioDuration;
use tracing::warn;

use crate::application::ports::{AudioCapture, CaptureError, LimitCallback};
use crate::domain::audio::{AudioBuffer, BYTES_PER_SAMPLE, SAMPLE_RATE};

/// Hotkey-controlled capture using cpal.
///
/// The stream lives on a dedicated thread because cpal::Stream is not Send.
/// The audio callback appends mono samples at the device rate; `stop`
/// resamples the whole take to the canonical 16kHz.
pub struct CpalCapture {
    /// Preferred input device index; None means the system default
    device_index: Option<usize>,
    /// Captured mono samples at the device sample rate
    samples: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate of the running stream
    device_sample_rate: Arc<AtomicU32>,
    is_capturing: Arc<AtomicBool>,
    /// Sample ceiling for the running capture, in device-rate samples
    max_samples: Arc<AtomicUsize>,
    limit_fired: Arc<AtomicBool>,
    on_limit: Arc<StdMutex<Option<LimitCallback>>>,
}

impl CpalCapture {
    pub fn new(device_index: Option<usize>) -> Self {
        Self {
            device_index,
            samples: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            max_samples: Arc::new(AtomicUsize::new(usize::MAX)),
            limit_fired: Arc::new(AtomicBool::new(false)),
            on_limit: Arc::new(StdMutex::new(None)),
        }
    }

    /// List input device names in index order, for `keyscribe devices`
    pub fn list_input_devices() -> Result<Vec<String>, CaptureError> {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to list devices: {}", e)))?;
        Ok(devices
            .map(|d| d.name().unwrap_or_else(|_| "(unknown)".to_string()))
            .collect())
    }

    /// Resolve the input device, by index if one was configured
    fn get_input_device(device_index: Option<usize>) -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        match device_index {
            Some(index) => host
                .input_devices()
                .map_err(|e| CaptureError::StartFailed(format!("Failed to list devices: {}", e)))?
                .nth(index)
                .ok_or(CaptureError::DeviceNotFound(index)),
            None => host.default_input_device().ok_or(CaptureError::NoAudioDevice),
        }
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get configs: {}", e)))?;

        // Try to find a config that supports our target sample rate
        // Prefer mono, but accept stereo (we'll mix down)
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            // Only consider i16 or f32 formats
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= SAMPLE_RATE
                && config.max_sample_rate().0 >= SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config
            .ok_or_else(|| CaptureError::UnsupportedFormat("No suitable config found".into()))?;

        // Use target sample rate if supported, otherwise use the minimum
        let sample_rate = if config_range.min_sample_rate().0 <= SAMPLE_RATE
            && config_range.max_sample_rate().0 >= SAMPLE_RATE
        {
            SampleRate(SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Resample device-rate audio to the canonical 16kHz
    fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, String> {
        if source_rate == SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| format!("Resampler init failed: {}", e))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();

            // Pad the tail chunk
            if chunk.len() < frames_needed {
                chunk.resize(frames_needed, 0.0);
            }

            let resampled = resampler
                .process(&[chunk], None)
                .map_err(|e| format!("Resampling failed: {}", e))?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Mix stereo to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Append mono samples from the audio callback, firing the limit
    /// callback once when the ceiling is crossed. Audio past the ceiling is
    /// discarded so the take never exceeds what the backend accepts.
    fn push_samples(
        buffer: &StdMutex<Vec<i16>>,
        mono: &[i16],
        max_samples: &AtomicUsize,
        limit_fired: &AtomicBool,
        on_limit: &StdMutex<Option<LimitCallback>>,
    ) {
        let max = max_samples.load(Ordering::SeqCst);
        let Ok(mut samples) = buffer.lock() else {
            return;
        };
        let remaining = max.saturating_sub(samples.len());
        let take = mono.len().min(remaining);
        samples.extend_from_slice(&mono[..take]);

        if samples.len() >= max && !limit_fired.swap(true, Ordering::SeqCst) {
            if let Ok(callback) = on_limit.lock() {
                if let Some(callback) = callback.as_ref() {
                    callback();
                }
            }
        }
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn start(
        &self,
        max_bytes: usize,
        on_limit: Option<LimitCallback>,
    ) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        {
            let mut samples = self.samples.lock().map_err(|_| {
                CaptureError::StartFailed("Capture buffer poisoned".to_string())
            })?;
            samples.clear();
        }
        self.limit_fired.store(false, Ordering::SeqCst);
        if let Ok(mut slot) = self.on_limit.lock() {
            *slot = on_limit;
        }

        self.is_capturing.store(true, Ordering::SeqCst);

        let device_index = self.device_index;
        let samples = Arc::clone(&self.samples);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);
        let max_samples = Arc::clone(&self.max_samples);
        let limit_fired = Arc::clone(&self.limit_fired);
        let on_limit = Arc::clone(&self.on_limit);

        // The stream thread reports its true outcome back through this
        // channel; `start` only returns Ok once the stream is playing.
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), CaptureError>>();

        // The stream lives on its own thread (cpal::Stream is not Send).
        std::thread::spawn(move || {
            let device = match CpalCapture::get_input_device(device_index) {
                Ok(d) => d,
                Err(e) => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let (config, sample_format) = match CpalCapture::get_input_config(&device) {
                Ok(c) => c,
                Err(e) => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            // Translate the canonical-byte ceiling into device-rate samples.
            let canonical_samples = max_bytes / BYTES_PER_SAMPLE;
            let device_max =
                (canonical_samples as f64 * sample_rate as f64 / SAMPLE_RATE as f64) as usize;
            max_samples.store(device_max, Ordering::SeqCst);

            let samples_clone = Arc::clone(&samples);
            let is_capturing_clone = Arc::clone(&is_capturing);
            let max_samples_clone = Arc::clone(&max_samples);
            let limit_fired_clone = Arc::clone(&limit_fired);
            let on_limit_clone = Arc::clone(&on_limit);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if is_capturing_clone.load(Ordering::SeqCst) {
                            let mono = CpalCapture::stereo_to_mono(data, channels);
                            CpalCapture::push_samples(
                                &samples_clone,
                                &mono,
                                &max_samples_clone,
                                &limit_fired_clone,
                                &on_limit_clone,
                            );
                        }
                    },
                    |err| warn!("audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let samples_clone = Arc::clone(&samples);
                    let is_capturing_clone = Arc::clone(&is_capturing);
                    let max_samples_clone = Arc::clone(&max_samples);
                    let limit_fired_clone = Arc::clone(&limit_fired);
                    let on_limit_clone = Arc::clone(&on_limit);

                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_capturing_clone.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalCapture::stereo_to_mono(&i16_data, channels);
                                CpalCapture::push_samples(
                                    &samples_clone,
                                    &mono,
                                    &max_samples_clone,
                                    &limit_fired_clone,
                                    &on_limit_clone,
                                );
                            }
                        },
                        |err| warn!("audio stream error: {}", err),
                        None,
                    )
                }

                other => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::UnsupportedFormat(format!(
                        "{:?}",
                        other
                    ))));
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::StartFailed(format!(
                        "Failed to build input stream: {}",
                        e
                    ))));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                is_capturing.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(CaptureError::StartFailed(format!(
                    "Failed to start stream: {}",
                    e
                ))));
                return;
            }

            let _ = ready_tx.send(Ok(()));

            while is_capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.is_capturing.store(false, Ordering::SeqCst);
                Err(e)
            }
            Err(_) => {
                self.is_capturing.store(false, Ordering::SeqCst);
                Err(CaptureError::StartFailed(
                    "Capture thread exited before the stream started".to_string(),
                ))
            }
        }
    }

    async fn stop(&self) -> AudioBuffer {
        if !self.is_capturing.swap(false, Ordering::SeqCst) {
            // Idempotent: stopping an inactive capture yields nothing.
            return AudioBuffer::default();
        }

        // Give the stream thread a moment to wind down
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        if let Ok(mut slot) = self.on_limit.lock() {
            *slot = None;
        }

        let samples = match self.samples.lock() {
            Ok(mut samples) => std::mem::take(&mut *samples),
            Err(_) => return AudioBuffer::default(),
        };
        if samples.is_empty() {
            return AudioBuffer::default();
        }

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return AudioBuffer::default();
        }

        let resampled = tokio::task::spawn_blocking(move || {
            CpalCapture::resample_to_16k(&samples, sample_rate)
        })
        .await;

        match resampled {
            Ok(Ok(samples)) => AudioBuffer::new(samples),
            Ok(Err(e)) => {
                warn!("resampling failed: {}", e);
                AudioBuffer::default()
            }
            Err(e) => {
                warn!("resample task failed: {}", e);
                AudioBuffer::default()
            }
        }
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}
