//! Live capture source: default input device plus a background analysis thread.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{AudioFrame, AudioSource, SpectrumAnalyser};
use crate::error::{Result, VizError};
use crate::params::AnalyserConfig;

/// Audio source analysing the default input device
pub struct CaptureSource {
    /// Latest complete frame published by the analysis thread
    latest: Arc<Mutex<Option<AudioFrame>>>,

    /// Cleared on drop to stop the analysis thread
    running: Arc<AtomicBool>,

    /// Input stream (kept alive)
    _stream: cpal::Stream,

    analysis_thread: Option<thread::JoinHandle<()>>,
}

impl CaptureSource {
    /// Open the default input device and start analysing it
    ///
    /// The device's own sample rate replaces `config.sample_rate_hz`.
    pub fn new(mut config: AnalyserConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| VizError::Audio("No audio input device found".to_string()))?;

        let supported = device
            .default_input_config()
            .map_err(|e| VizError::Audio(format!("Failed to get input config: {}", e)))?;

        config.sample_rate_hz = supported.sample_rate().0 as usize;
        let analyser = SpectrumAnalyser::new(config.clone())?;

        tracing::info!(
            "Capture: {} @ {}Hz, {} channel(s)",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate_hz,
            supported.channels()
        );

        let samples = Arc::new(Mutex::new(Vec::<f32>::new()));
        let stream_config: cpal::StreamConfig = supported.config();

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => {
                build_input::<f32>(&device, &stream_config, &config, Arc::clone(&samples))?
            }
            cpal::SampleFormat::I16 => {
                build_input::<i16>(&device, &stream_config, &config, Arc::clone(&samples))?
            }
            cpal::SampleFormat::U16 => {
                build_input::<u16>(&device, &stream_config, &config, Arc::clone(&samples))?
            }
            other => {
                return Err(VizError::Audio(format!(
                    "Unsupported sample format {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| VizError::Audio(format!("Failed to start input stream: {}", e)))?;

        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));
        let analysis_thread = spawn_analysis_thread(
            analyser,
            samples,
            Arc::clone(&latest),
            Arc::clone(&running),
        );

        Ok(Self {
            latest,
            running,
            _stream: stream,
            analysis_thread: Some(analysis_thread),
        })
    }
}

impl AudioSource for CaptureSource {
    fn latest_frame(&mut self) -> Option<AudioFrame> {
        self.latest.lock().ok().and_then(|frame| frame.clone())
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.analysis_thread.take() {
            if handle.join().is_err() {
                tracing::warn!("Analysis thread panicked");
            }
        }
    }
}

/// Build an input stream that mixes the first channel into `samples`
fn build_input<T>(
    device: &cpal::Device,
    stream_config: &cpal::StreamConfig,
    config: &AnalyserConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = stream_config.channels.max(1) as usize;
    // Bound the backlog if the analysis thread falls behind
    let keep = config.fft_size;
    let limit = keep * 4;

    device
        .build_input_stream(
            stream_config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let Ok(mut buf) = samples.lock() else {
                    return;
                };
                buf.extend(data.iter().step_by(channels).map(|&s| s.to_sample::<f32>()));
                if buf.len() > limit {
                    let excess = buf.len() - keep;
                    buf.drain(..excess);
                }
            },
            |err| tracing::error!("Audio input stream error: {}", err),
            None,
        )
        .map_err(|e| VizError::Audio(format!("Failed to build input stream: {}", e)))
}

/// Spawn the thread that turns captured samples into frames
fn spawn_analysis_thread(
    mut analyser: SpectrumAnalyser,
    samples: Arc<Mutex<Vec<f32>>>,
    latest: Arc<Mutex<Option<AudioFrame>>>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    let interval = Duration::from_millis(analyser.config().update_interval_ms);
    let fft_size = analyser.config().fft_size;

    thread::spawn(move || {
        while running.load(Ordering::Relaxed) {
            thread::sleep(interval);

            let recent = {
                let Ok(mut buf) = samples.lock() else {
                    break;
                };
                if buf.len() > fft_size {
                    let excess = buf.len() - fft_size;
                    buf.drain(..excess);
                }
                buf.clone()
            };
            if recent.is_empty() {
                continue;
            }

            let frame = analyser.analyse(&recent);
            if let Ok(mut slot) = latest.lock() {
                *slot = Some(frame);
            }
        }
        tracing::debug!("Analysis thread stopped");
    })
}
