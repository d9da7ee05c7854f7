//! Audio analysis and sampling configuration.

use crate::error::{Result, VizError};

/// Spectrum analyser window function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Hann,
    Blackman,
}

/// Spectrum analysis configuration
///
/// Defaults reproduce a browser analyser node with `fftSize = 1024`.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: usize,

    /// FFT window size (power of 2); frames carry half as many bins
    pub fft_size: usize,

    /// Analysis interval for the capture thread (milliseconds)
    /// 16 ms ≈ one frame at 60 Hz
    pub update_interval_ms: u64,

    /// Weight of the previous magnitude in the running average, [0, 1)
    pub smoothing: f32,

    /// Magnitude mapped to byte 0 (dBFS)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dBFS)
    pub max_decibels: f32,

    pub window: WindowKind,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 1024,
            update_interval_ms: 16,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
            window: WindowKind::Blackman,
        }
    }
}

impl AnalyserConfig {
    /// Number of magnitude bins per frame
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(VizError::InvalidAnalyser(format!(
                "FFT size must be a power of 2 in [32, 32768], got {}",
                self.fft_size
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(VizError::InvalidAnalyser(
                "Sample rate must be > 0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(VizError::InvalidAnalyser(format!(
                "Smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(VizError::InvalidAnalyser(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

/// Which part of an audio frame the band sampler partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandRegion {
    /// First half of the frame only; the upper bins stay quiet for most music
    #[default]
    LowerHalf,
    /// Whole frame
    Full,
}

impl BandRegion {
    /// Number of leading bins the region covers in a frame of `frame_len`
    pub fn usable_len(self, frame_len: usize) -> usize {
        match self {
            BandRegion::LowerHalf => frame_len / 2,
            BandRegion::Full => frame_len,
        }
    }
}

/// Band sampler configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplerConfig {
    pub region: BandRegion,
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;

    /// Largest byte magnitude in an audio frame
    pub const MAX_MAGNITUDE: f32 = 255.0;
}
