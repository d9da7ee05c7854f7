//! Geometry construction from a parameter snapshot.

use super::{Curve, GeometryStore, SectorMesh, Segment};
use crate::color::{rainbow, CURVE_BRIGHTNESS};
use crate::params::ParameterSet;
use crate::spiral;
use glam::Vec3;

/// Build every curve and segment for `params`
///
/// Curves start flat at their baseline; heights are the frame updater's job.
/// The returned store has generation 0; [`super::SpringSystem`] numbers it.
pub fn build(params: &ParameterSet) -> GeometryStore {
    let count = params.num_curves;
    let mut curves = Vec::with_capacity(count);
    let mut segments = Vec::with_capacity(count);

    for i in 0..count {
        let baseline = spiral::baseline(i, params);

        curves.push(Curve::new(
            i,
            baseline,
            params.nodes_per_curve,
            rainbow(i, count, CURVE_BRIGHTNESS),
        ));

        segments.push(Segment {
            index: i,
            baseline,
            color: rainbow(i, count, params.segment_brightness),
            mesh: SectorMesh::slot(params.segment_base_radius, i, count),
            scale: Vec3::ONE,
            rotation: 0.0,
        });
    }

    GeometryStore {
        curves,
        segments,
        generation: 0,
    }
}
