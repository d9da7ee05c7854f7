//! Render-ready views of the geometry: Pod vertex/instance data for GPU
//! upload and a serializable snapshot for inspection.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::{Curve, FrameDelta, GeometryStore, Segment};
use crate::color::Color;
use crate::params::ParameterSet;

/// Line-strip vertex for curves (position + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Per-instance data for drawing a segment mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Curve {
    /// Line-strip vertices in render order
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let color = self.color.to_array();
        self.points()
            .iter()
            .map(|p| LineVertex {
                position: p.to_array(),
                color,
            })
            .collect()
    }
}

impl Segment {
    pub fn instance(&self) -> SegmentInstance {
        SegmentInstance {
            model: self.model_matrix().to_cols_array_2d(),
            color: self.color.with_alpha(1.0),
        }
    }
}

impl GeometryStore {
    /// `(curve index, vertices)` for every curve the delta marks dirty
    ///
    /// A delta from an older generation yields nothing: its indices no
    /// longer describe this store.
    pub fn line_vertices_for(&self, delta: &FrameDelta) -> Vec<(usize, Vec<LineVertex>)> {
        if delta.generation != self.generation {
            return Vec::new();
        }
        delta
            .dirty_curves
            .iter()
            .filter_map(|&i| self.curves.get(i).map(|c| (i, c.line_vertices())))
            .collect()
    }

    /// One instance per segment, in index order
    pub fn segment_instances(&self) -> Vec<SegmentInstance> {
        self.segments.iter().map(Segment::instance).collect()
    }
}

/// Serializable copy of a curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot {
    pub index: usize,
    pub color: Color,
    /// Spiral position (x, z), shared with the segment of the same index
    pub baseline: Vec2,
    pub points: Vec<Vec3>,
}

/// Serializable copy of a segment's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub index: usize,
    pub color: Color,
    pub baseline: Vec2,
    pub scale: Vec3,
    pub rotation: f32,
}

/// Serializable copy of the whole store plus the parameters it was built for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub generation: u64,
    pub params: ParameterSet,
    pub curves: Vec<CurveSnapshot>,
    pub segments: Vec<SegmentSnapshot>,
}

impl GeometrySnapshot {
    pub fn capture(store: &GeometryStore, params: &ParameterSet) -> Self {
        Self {
            generation: store.generation,
            params: *params,
            curves: store
                .curves
                .iter()
                .map(|c| CurveSnapshot {
                    index: c.index,
                    color: c.color,
                    baseline: c.baseline,
                    points: c.points().to_vec(),
                })
                .collect(),
            segments: store
                .segments
                .iter()
                .map(|s| SegmentSnapshot {
                    index: s.index,
                    color: s.color,
                    baseline: s.baseline,
                    scale: s.scale,
                    rotation: s.rotation,
                })
                .collect(),
        }
    }
}
