//! Spring spiral parameters, field metadata and change classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Complete visualization parameter snapshot
///
/// Published whole by the configuration surface; the builder and frame
/// updater only ever read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    /// Number of spring curves (and paired segments)
    pub num_curves: usize,

    /// Points per curve (line smoothness)
    pub nodes_per_curve: usize,

    /// Half-turns of the spring coil along a curve ("springiness")
    pub curve_wave_frequency: f32,

    /// Height of a curve at full audio level (world units)
    pub curve_height_scale: f32,

    /// Radial growth of the spiral per radian ("move in/out")
    pub spiral_radial_scale: f32,

    /// Total spiral sweep in half-turns across all curves
    pub spiral_phase: f32,

    /// Segment lightness percent, 0 = black, 100 = white
    pub segment_brightness: f32,

    /// Segment disc radius before audio scaling (world units)
    pub segment_base_radius: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            num_curves: 65,
            nodes_per_curve: 150,
            curve_wave_frequency: 13.0,
            curve_height_scale: 14.0,
            spiral_radial_scale: 1.599_333,
            spiral_phase: 5.186_617,
            segment_brightness: 37.146_98,
            segment_base_radius: 40.0,
        }
    }
}

/// How a new snapshot differs from the one it replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamChange {
    Unchanged,
    /// Only per-tick fields changed; next tick picks them up
    Passive,
    /// Geometry must be rebuilt
    Structural,
}

/// Names of the eight parameter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    NumCurves,
    NodesPerCurve,
    CurveWaveFrequency,
    CurveHeightScale,
    SpiralRadialScale,
    SpiralPhase,
    SegmentBrightness,
    SegmentBaseRadius,
}

impl ParamField {
    pub const ALL: [ParamField; 8] = [
        ParamField::NumCurves,
        ParamField::NodesPerCurve,
        ParamField::CurveWaveFrequency,
        ParamField::CurveHeightScale,
        ParamField::SpiralRadialScale,
        ParamField::SpiralPhase,
        ParamField::SegmentBrightness,
        ParamField::SegmentBaseRadius,
    ];

    /// camelCase name, as used in preset files and `--set` overrides
    pub fn name(self) -> &'static str {
        match self {
            ParamField::NumCurves => "numCurves",
            ParamField::NodesPerCurve => "nodesPerCurve",
            ParamField::CurveWaveFrequency => "curveWaveFrequency",
            ParamField::CurveHeightScale => "curveHeightScale",
            ParamField::SpiralRadialScale => "spiralRadialScale",
            ParamField::SpiralPhase => "spiralPhase",
            ParamField::SegmentBrightness => "segmentBrightness",
            ParamField::SegmentBaseRadius => "segmentBaseRadius",
        }
    }

    /// Changing a structural field invalidates the built geometry
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ParamField::NumCurves
                | ParamField::NodesPerCurve
                | ParamField::SegmentBrightness
                | ParamField::SegmentBaseRadius
        )
    }

    /// Accepted range, inclusive on both ends
    pub fn bounds(self) -> (f32, f32) {
        match self {
            ParamField::NumCurves => (1.0, 256.0),
            ParamField::NodesPerCurve => (1.0, 300.0),
            // Zero is allowed: a straight vertical line instead of a coil
            ParamField::CurveWaveFrequency => (0.0, 100.0),
            ParamField::CurveHeightScale => (1.0, 100.0),
            ParamField::SpiralRadialScale => (0.1, 10.0),
            ParamField::SpiralPhase => (1.0, 50.0),
            ParamField::SegmentBrightness => (0.0, 100.0),
            ParamField::SegmentBaseRadius => (0.0, 100.0),
        }
    }

    fn is_integer(self) -> bool {
        matches!(self, ParamField::NumCurves | ParamField::NodesPerCurve)
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamField {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        ParamField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VizError::UnknownField(s.to_string()))
    }
}

impl ParameterSet {
    /// Read a field as a float
    pub fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::NumCurves => self.num_curves as f32,
            ParamField::NodesPerCurve => self.nodes_per_curve as f32,
            ParamField::CurveWaveFrequency => self.curve_wave_frequency,
            ParamField::CurveHeightScale => self.curve_height_scale,
            ParamField::SpiralRadialScale => self.spiral_radial_scale,
            ParamField::SpiralPhase => self.spiral_phase,
            ParamField::SegmentBrightness => self.segment_brightness,
            ParamField::SegmentBaseRadius => self.segment_base_radius,
        }
    }

    /// Copy of `self` with one field replaced, validated before it is returned
    ///
    /// Integer fields round to the nearest whole number.
    pub fn with(&self, field: ParamField, value: f32) -> Result<Self> {
        check_field(field, value)?;

        let mut next = *self;
        match field {
            ParamField::NumCurves => next.num_curves = value.round() as usize,
            ParamField::NodesPerCurve => next.nodes_per_curve = value.round() as usize,
            ParamField::CurveWaveFrequency => next.curve_wave_frequency = value,
            ParamField::CurveHeightScale => next.curve_height_scale = value,
            ParamField::SpiralRadialScale => next.spiral_radial_scale = value,
            ParamField::SpiralPhase => next.spiral_phase = value,
            ParamField::SegmentBrightness => next.segment_brightness = value,
            ParamField::SegmentBaseRadius => next.segment_base_radius = value,
        }
        Ok(next)
    }

    /// Check every field against its documented range
    pub fn validate(&self) -> Result<()> {
        for field in ParamField::ALL {
            check_field(field, self.get(field))?;
        }
        Ok(())
    }

    /// Classify the move from `self` to `next`
    pub fn classify_change(&self, next: &ParameterSet) -> ParamChange {
        let mut change = ParamChange::Unchanged;
        for field in ParamField::ALL {
            if self.get(field) == next.get(field) {
                continue;
            }
            if field.is_structural() {
                return ParamChange::Structural;
            }
            change = ParamChange::Passive;
        }
        change
    }
}

fn check_field(field: ParamField, value: f32) -> Result<()> {
    let (min, max) = field.bounds();
    let value_in_range = if field.is_integer() {
        value.is_finite() && (min..=max).contains(&value.round())
    } else {
        value.is_finite() && (min..=max).contains(&value)
    };

    if value_in_range {
        Ok(())
    } else {
        Err(VizError::InvalidParameter {
            field,
            value,
            min,
            max,
        })
    }
}
