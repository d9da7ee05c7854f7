//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::audio::{AudioSource, SilentSource, SynthSource};
use crate::error::{Result, VizError};
use crate::params::{
    AnalyserConfig, BandRegion, ParamField, ParameterSurface, PresetBook, SamplerConfig,
};

/// Where audio frames come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioChoice {
    /// No audio; curves stand at full height and segments spin slowly
    #[value(name = "none")]
    Silent,
    /// Built-in procedural composition
    Synth,
    /// Default input device (requires the `capture` feature)
    Capture,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Vibespring")]
#[command(about = "Audio-reactive spring spiral geometry engine", long_about = None)]
pub struct Args {
    /// Preset to start from (defaults to the one the preset book selects)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// JSON preset book to use instead of the built-in presets
    #[arg(long, value_name = "FILE")]
    pub presets: Option<PathBuf>,

    /// Override a parameter after the preset loads, e.g. numCurves=32 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub overrides: Vec<String>,

    /// Remember the starting parameters (after overrides) under this name
    #[arg(long, value_name = "NAME")]
    pub remember: Option<String>,

    /// Write the preset book, including any remembered preset, as JSON
    #[arg(long, value_name = "FILE")]
    pub save_presets: Option<PathBuf>,

    /// Audio source
    #[arg(long, value_enum, default_value_t = AudioChoice::Synth)]
    pub audio: AudioChoice,

    /// Number of frames to run
    #[arg(long, value_name = "N", default_value_t = 600)]
    pub frames: u64,

    /// Frame rate of the tick loop
    #[arg(long, value_name = "FPS", default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Pace frames in real time instead of running flat out
    #[arg(long)]
    pub realtime: bool,

    /// Switch to this preset halfway through the run
    #[arg(long, value_name = "NAME")]
    pub switch_to: Option<String>,

    /// Sample bands over the whole spectrum instead of its lower half
    #[arg(long)]
    pub full_spectrum: bool,

    /// Write the final geometry as JSON
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    /// Load the preset book named on the command line, or the built-in one
    pub fn preset_book(&self) -> Result<PresetBook> {
        match &self.presets {
            Some(path) => PresetBook::load(path),
            None => Ok(PresetBook::builtin()),
        }
    }

    /// Starting parameters: the book's preset, or `--preset`, then `--set`
    /// overrides, optionally remembered under `--remember`
    pub fn parameter_surface(&self) -> Result<ParameterSurface> {
        let mut surface = ParameterSurface::new(self.preset_book()?)?;
        if let Some(name) = &self.preset {
            surface.load_preset(name)?;
        }
        for (field, value) in self.parse_overrides()? {
            surface.set(field, value)?;
        }
        if let Some(name) = &self.remember {
            surface.remember_as(name)?;
        }
        Ok(surface)
    }

    /// Name of the preset the run starts from
    pub fn start_preset<'a>(&'a self, surface: &'a ParameterSurface) -> &'a str {
        self.preset
            .as_deref()
            .unwrap_or(surface.presets().preset.as_str())
    }

    /// Parse every `--set FIELD=VALUE`
    pub fn parse_overrides(&self) -> Result<Vec<(ParamField, f32)>> {
        self.overrides
            .iter()
            .map(|raw| {
                let (field, value) = raw
                    .split_once('=')
                    .ok_or_else(|| VizError::MalformedOverride(raw.clone()))?;
                let field: ParamField = field.trim().parse()?;
                let value: f32 = value
                    .trim()
                    .parse()
                    .map_err(|_| VizError::MalformedOverride(raw.clone()))?;
                Ok((field, value))
            })
            .collect()
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            region: if self.full_spectrum {
                BandRegion::Full
            } else {
                BandRegion::LowerHalf
            },
        }
    }

    /// Open the selected audio source
    pub fn open_audio(&self) -> Result<Box<dyn AudioSource>> {
        let config = AnalyserConfig::default();
        match self.audio {
            AudioChoice::Silent => {
                tracing::info!("Audio: none (neutral levels)");
                Ok(Box::new(SilentSource))
            }
            AudioChoice::Synth => Ok(Box::new(SynthSource::new(config, self.fps)?)),
            AudioChoice::Capture => open_capture(config),
        }
    }
}

#[cfg(feature = "capture")]
fn open_capture(config: AnalyserConfig) -> Result<Box<dyn AudioSource>> {
    Ok(Box::new(crate::audio::CaptureSource::new(config)?))
}

#[cfg(not(feature = "capture"))]
fn open_capture(_config: AnalyserConfig) -> Result<Box<dyn AudioSource>> {
    Err(VizError::Audio(
        "built without the `capture` feature".to_string(),
    ))
}
