//! FFT spectrum analysis producing byte-range magnitude frames.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use super::AudioFrame;
use crate::error::Result;
use crate::params::{audio_constants::MAX_MAGNITUDE, AnalyserConfig, WindowKind};

/// Turns the most recent PCM samples into an [`AudioFrame`]
///
/// Magnitudes are smoothed over time, converted to decibels and mapped
/// linearly from `[min_decibels, max_decibels]` onto `[0, 255]`.
pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate()?;

        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        let window = (0..size)
            .map(|i| match config.window {
                WindowKind::Hann => hann_window(i, size),
                WindowKind::Blackman => blackman_window(i, size),
            })
            .collect();

        tracing::debug!(
            "Spectrum analyser: fft_size={}, bins={}, window={:?}",
            size,
            config.bin_count(),
            config.window
        );

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.bin_count()],
            config,
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Analyse the last `fft_size` samples (zero-padded in front if short)
    pub fn analyse(&mut self, samples: &[f32]) -> AudioFrame {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let scale = 1.0 / size as f32;
        let magnitudes = self
            .smoothed
            .iter_mut()
            .zip(&self.buffer)
            .map(|(smoothed, bin)| {
                *smoothed = tau * *smoothed + (1.0 - tau) * bin.norm() * scale;
                magnitude_to_byte(
                    *smoothed,
                    self.config.min_decibels,
                    self.config.max_decibels,
                )
            })
            .collect();

        AudioFrame::new(magnitudes)
    }

    /// Forget the smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }
}

/// Map a linear magnitude onto a byte via its decibel value
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 || !magnitude.is_finite() {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = MAX_MAGNITUDE * (db - min_db) / (max_db - min_db);
    scaled.floor().clamp(0.0, MAX_MAGNITUDE) as u8
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Blackman window function (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = 2.0 * PI * index as f32 / size as f32;
    0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
}
