//! Circular-sector mesh generation for segments.

use bytemuck::{Pod, Zeroable};

/// Triangles in a full circle; a sector spreads all of them over its arc
pub const SECTOR_SUBDIVISIONS: u32 = 64;

/// Vertex data for segment meshes (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle fan covering `[theta_start, theta_start + theta_length]`
///
/// Authored in the XY plane around the origin; vertex 0 is the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub radius: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl SectorMesh {
    pub fn new(radius: f32, theta_start: f32, theta_length: f32) -> Self {
        let mut vertices = Vec::with_capacity(SECTOR_SUBDIVISIONS as usize + 2);
        let mut indices = Vec::with_capacity(SECTOR_SUBDIVISIONS as usize * 3);

        vertices.push(MeshVertex {
            position: [0.0, 0.0, 0.0],
            uv: [0.5, 0.5],
        });

        // Rim vertices, first and last on the sector edges
        for s in 0..=SECTOR_SUBDIVISIONS {
            let theta = theta_start + s as f32 / SECTOR_SUBDIVISIONS as f32 * theta_length;
            let (sin, cos) = theta.sin_cos();
            vertices.push(MeshVertex {
                position: [radius * cos, radius * sin, 0.0],
                uv: [(cos + 1.0) / 2.0, (sin + 1.0) / 2.0],
            });
        }

        // Counter-clockwise fan around the centre
        for i in 1..=SECTOR_SUBDIVISIONS {
            indices.extend_from_slice(&[i, i + 1, 0]);
        }

        Self {
            vertices,
            indices,
            radius,
            theta_start,
            theta_length,
        }
    }

    /// Sector `slot` of a circle cut into `slots` equal wedges
    pub fn slot(radius: f32, slot: usize, slots: usize) -> Self {
        let wedge = std::f32::consts::TAU / slots.max(1) as f32;
        Self::new(radius, slot as f32 * wedge, wedge)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
