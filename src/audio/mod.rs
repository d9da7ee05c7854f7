//! Audio frames, the sources that supply them, and the samplers that read them.
//!
//! The geometry core only ever sees [`AudioFrame`]s; where they come from
//! (synthesis, a capture device, nothing at all) is decided by the caller
//! through an [`AudioSource`].

mod analyser;
#[cfg(feature = "capture")]
mod capture;
pub mod sampler;
mod synthesis;

use serde::{Deserialize, Serialize};

// Re-export public types
pub use analyser::{blackman_window, hann_window, magnitude_to_byte, SpectrumAnalyser};
#[cfg(feature = "capture")]
pub use capture::CaptureSource;
pub use sampler::{band_energy, band_energy_in, band_totals, band_window, overall_energy};
pub use synthesis::{SynthSource, GLICOL_COMPOSITION};

/// One snapshot of byte-range frequency magnitudes, lowest bin first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioFrame {
    magnitudes: Vec<u8>,
}

impl AudioFrame {
    pub fn new(magnitudes: Vec<u8>) -> Self {
        Self { magnitudes }
    }

    /// Frame of `len` bins all at `value`
    pub fn filled(len: usize, value: u8) -> Self {
        Self::new(vec![value; len])
    }

    pub fn magnitudes(&self) -> &[u8] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

impl From<Vec<u8>> for AudioFrame {
    fn from(magnitudes: Vec<u8>) -> Self {
        Self::new(magnitudes)
    }
}

/// Supplier of the most recent audio frame, polled once per tick
pub trait AudioSource {
    /// Latest frame, or `None` while no audio is available yet
    fn latest_frame(&mut self) -> Option<AudioFrame>;
}

/// Source that never has audio; every tick falls back to neutral levels
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSource;

impl AudioSource for SilentSource {
    fn latest_frame(&mut self) -> Option<AudioFrame> {
        None
    }
}

/// Source that replays one fixed frame forever
#[derive(Debug, Clone)]
pub struct FixedSource(pub AudioFrame);

impl AudioSource for FixedSource {
    fn latest_frame(&mut self) -> Option<AudioFrame> {
        Some(self.0.clone())
    }
}
