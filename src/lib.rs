//! Vibespring library - Audio-reactive spring spiral geometry
//!
//! Spring curves and circular segments laid out along a spiral, pulsing to
//! the frequency spectrum of an audio signal. The crate builds and animates
//! the geometry; drawing it is left to whatever render driver ticks it.

pub mod audio;
pub mod cli;
pub mod color;
pub mod error;
pub mod geometry;
pub mod params;
pub mod spiral;

pub use error::{Result, VizError};
