//! Spring curves and segment meshes: storage, construction and animation.
//!
//! [`build`] creates a [`GeometryStore`] from a parameter snapshot, [`tick`]
//! animates it from an audio frame, and [`SpringSystem`] ties the two
//! together with rebuild-on-structural-change.

mod buffers;
mod builder;
mod mesh;
mod system;
mod update;

use glam::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::color::Color;

// Re-export public types
pub use buffers::{CurveSnapshot, GeometrySnapshot, LineVertex, SegmentInstance, SegmentSnapshot};
pub use builder::build;
pub use mesh::{MeshVertex, SectorMesh, SECTOR_SUBDIVISIONS};
pub use system::SpringSystem;
pub use update::{tick, tick_with, BASE_SPIN, SCALE_FLOOR, VOLUME_SPIN};

/// One spring line
#[derive(Debug, Clone)]
pub struct Curve {
    pub index: usize,
    /// Spiral position on the ground plane (x, z)
    pub baseline: Vec2,
    pub color: Color,
    points: Vec<Vec3>,
    revision: u64,
}

impl Curve {
    pub(crate) fn new(index: usize, baseline: Vec2, nodes: usize, color: Color) -> Self {
        Self {
            index,
            baseline,
            color,
            points: vec![Vec3::new(baseline.x, 0.0, baseline.y); nodes],
            revision: 0,
        }
    }

    /// Points in render order
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Bumped every time the points are rewritten
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// One circular-sector mesh, paired with the curve of the same index
#[derive(Debug, Clone)]
pub struct Segment {
    pub index: usize,
    /// Spiral position shared with the paired curve (x, z)
    pub baseline: Vec2,
    pub color: Color,
    pub mesh: SectorMesh,
    /// Audio-driven scale, z stays 1
    pub scale: Vec3,
    /// Accumulated spin about the mesh normal, wrapped to [0, 2π) radians
    pub rotation: f32,
}

impl Segment {
    /// Quarter turn about X that lays the XY-authored mesh into the XZ plane
    pub fn base_rotation() -> Quat {
        Quat::from_rotation_x(FRAC_PI_2)
    }

    /// Full orientation: base rotation, then the spin about the local Z axis
    pub fn orientation(&self) -> Quat {
        Self::base_rotation() * Quat::from_rotation_z(self.rotation)
    }

    /// Model matrix (segments are centred on the world origin)
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), Vec3::ZERO)
    }
}

/// All curves and segments for one parameter snapshot
///
/// Holds exactly `num_curves` of each, or nothing.
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    pub curves: Vec<Curve>,
    pub segments: Vec<Segment>,
    /// Incremented by every rebuild
    pub generation: u64,
}

impl GeometryStore {
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.segments.is_empty()
    }

    /// Number of curve/segment pairs
    pub fn len(&self) -> usize {
        self.curves.len()
    }
}

/// What a tick changed, for the render driver to upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDelta {
    /// Curves whose points were rewritten
    pub dirty_curves: Vec<usize>,
    /// Overall loudness used for the segment spin
    pub volume_boost: f32,
    /// Store generation the delta applies to
    pub generation: u64,
}

impl FrameDelta {
    pub fn is_empty(&self) -> bool {
        self.dirty_curves.is_empty()
    }
}
