//! Named parameter presets and their JSON file format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ParameterSet;
use crate::error::{Result, VizError};

/// Preset selected when a book does not name one
pub const DEFAULT_PRESET: &str = "Default";

/// A collection of named parameter snapshots
///
/// File format:
/// ```json
/// { "preset": "Default", "remembered": { "Default": { "numCurves": 65, ... } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetBook {
    /// Name of the preset to start with
    #[serde(default = "default_preset_name")]
    pub preset: String,

    pub remembered: BTreeMap<String, ParameterSet>,
}

fn default_preset_name() -> String {
    DEFAULT_PRESET.to_string()
}

impl PresetBook {
    /// The four looks the visualizer ships with
    pub fn builtin() -> Self {
        let mut remembered = BTreeMap::new();

        remembered.insert(DEFAULT_PRESET.to_string(), ParameterSet::default());

        // Tight coils that read as triangles from above
        remembered.insert(
            "Triangles".to_string(),
            ParameterSet {
                num_curves: 65,
                nodes_per_curve: 150,
                curve_wave_frequency: 100.0,
                curve_height_scale: 37.775_51,
                spiral_radial_scale: 0.510_224,
                spiral_phase: 20.819_18,
                segment_brightness: 37.146_98,
                segment_base_radius: 48.148_08,
            },
        );

        // Dense petals, no segments
        remembered.insert(
            "Flower".to_string(),
            ParameterSet {
                num_curves: 219,
                nodes_per_curve: 145,
                curve_wave_frequency: 83.368_25,
                curve_height_scale: 18.171_547,
                spiral_radial_scale: 0.619_135,
                spiral_phase: 31.061_207,
                segment_brightness: 0.0,
                segment_base_radius: 0.0,
            },
        );

        // Single-node curves collapse to points; only the disc is visible
        remembered.insert(
            "Segments Only".to_string(),
            ParameterSet {
                num_curves: 256,
                nodes_per_curve: 1,
                curve_wave_frequency: 0.1,
                curve_height_scale: 1.0,
                spiral_radial_scale: 0.1,
                spiral_phase: 1.0,
                segment_brightness: 50.348_3,
                segment_base_radius: 49.248_19,
            },
        );

        Self {
            preset: DEFAULT_PRESET.to_string(),
            remembered,
        }
    }

    /// Read a book from a JSON file, validating every preset in it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let book: PresetBook = serde_json::from_str(&text)?;
        for params in book.remembered.values() {
            params.validate()?;
        }
        tracing::debug!(
            "Loaded {} presets from {}",
            book.remembered.len(),
            path.as_ref().display()
        );
        Ok(book)
    }

    /// Write the book as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Look up a preset by name
    pub fn get(&self, name: &str) -> Result<ParameterSet> {
        self.remembered
            .get(name)
            .copied()
            .ok_or_else(|| VizError::UnknownPreset(name.to_string()))
    }

    /// The preset the book starts with
    pub fn initial(&self) -> Result<ParameterSet> {
        self.get(&self.preset)
    }

    /// Store (or replace) a named preset
    pub fn remember(&mut self, name: impl Into<String>, params: ParameterSet) -> Result<()> {
        params.validate()?;
        self.remembered.insert(name.into(), params);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.remembered.keys().map(String::as_str)
    }
}

impl Default for PresetBook {
    fn default() -> Self {
        Self::builtin()
    }
}
