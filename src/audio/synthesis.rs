//! Procedural audio source: a Glicol composition rendered offline, one tick
//! of samples at a time, and fed through the spectrum analyser.

use glicol::Engine;

use super::{AudioFrame, AudioSource, SpectrumAnalyser};
use crate::error::{Result, VizError};
use crate::params::{audio_constants::BLOCK_SIZE, AnalyserConfig};

/// Glicol composition (procedural music code)
///
/// A fast saw arpeggio over two octaves through a sweeping filter, so energy
/// moves across the lower spectrum from tick to tick.
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 60 _60 _~a 48
~a: choose 36 48 55 60 72 0 0
~amp: ~gate >> envperc 0.002 0.2
~pit: ~gate >> mul 130.81
~lead: saw ~pit >> mul ~amp >> lpf ~mod 3.0 >> mul 0.2
~mod: sin 0.15 >> mul 1800 >> add 2200
o: ~lead >> plate 0.1
"#;

/// Audio source that synthesizes its own signal
pub struct SynthSource {
    engine: Engine<BLOCK_SIZE>,
    analyser: SpectrumAnalyser,
    /// Most recent samples, trimmed to the FFT size
    history: Vec<f32>,
    /// Samples to render per tick
    samples_per_tick: f32,
    /// Samples owed but not yet rendered (fractional block carry-over)
    owed: f32,
}

impl SynthSource {
    /// Create a synth that advances `sample_rate / fps` samples per tick
    pub fn new(config: AnalyserConfig, fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(VizError::Audio("Frame rate must be > 0".to_string()));
        }
        let analyser = SpectrumAnalyser::new(config)?;
        let sample_rate = analyser.config().sample_rate_hz;

        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| VizError::Audio(format!("Glicol engine init failed: {:?}", e)))?;

        tracing::info!("Synth source: {} Hz, {} ticks/s", sample_rate, fps);

        Ok(Self {
            engine,
            history: Vec::with_capacity(analyser.config().fft_size + BLOCK_SIZE),
            analyser,
            samples_per_tick: sample_rate as f32 / fps as f32,
            owed: 0.0,
        })
    }

    /// Render one tick's worth of audio into the sample history
    fn advance(&mut self) {
        self.owed += self.samples_per_tick;

        while self.owed >= BLOCK_SIZE as f32 {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                // Mono mixdown of the stereo output
                self.history.push(0.5 * (buffers[0][i] + buffers[1][i]));
            }
            self.owed -= BLOCK_SIZE as f32;
        }

        let keep = self.analyser.config().fft_size;
        if self.history.len() > keep {
            let excess = self.history.len() - keep;
            self.history.drain(..excess);
        }
    }
}

impl AudioSource for SynthSource {
    fn latest_frame(&mut self) -> Option<AudioFrame> {
        self.advance();
        Some(self.analyser.analyse(&self.history))
    }
}
