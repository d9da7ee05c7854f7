//! Parameter definitions with documented ranges and semantics.
//!
//! Visual parameters, the presets that bundle them, the surface that
//! edits them, and the audio analysis configuration.

mod audio;
mod presets;
mod spring;
mod surface;

// Re-export all types
pub use audio::{audio_constants, AnalyserConfig, BandRegion, SamplerConfig, WindowKind};
pub use presets::{PresetBook, DEFAULT_PRESET};
pub use spring::{ParamChange, ParamField, ParameterSet};
pub use surface::ParameterSurface;
