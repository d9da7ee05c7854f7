//! Spiral placement of curve and segment baselines on the ground plane.

use glam::Vec2;
use std::f32::consts::PI;

use crate::params::ParameterSet;

/// Offset added to the spiral parameter so index 0 never sits on the origin
pub const SPIRAL_START: f32 = 1.5;

/// Ground-plane axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Spiral parameter `t` for curve `index`
pub fn spiral_t(index: usize, num_curves: usize, spiral_phase: f32) -> f32 {
    SPIRAL_START + index as f32 * PI * spiral_phase / num_curves as f32
}

/// One coordinate of the spiral position of curve `index`
///
/// An Archimedean spiral: radius `t * radial_scale` at angle `t`.
pub fn position(
    axis: Axis,
    index: usize,
    num_curves: usize,
    radial_scale: f32,
    spiral_phase: f32,
) -> f32 {
    let t = spiral_t(index, num_curves, spiral_phase);
    match axis {
        Axis::X => t * radial_scale * t.cos(),
        Axis::Z => t * radial_scale * t.sin(),
    }
}

/// Baseline `(X, Z)` of curve `index` for the given parameters
pub fn baseline(index: usize, params: &ParameterSet) -> Vec2 {
    let place = |axis| {
        position(
            axis,
            index,
            params.num_curves,
            params.spiral_radial_scale,
            params.spiral_phase,
        )
    };
    Vec2::new(place(Axis::X), place(Axis::Z))
}
