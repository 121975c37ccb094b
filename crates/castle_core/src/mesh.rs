//! Mesh geometry produced by the importer.
//!
//! This is a plain data record, deliberately decoupled from any engine mesh
//! type. The host's adapter converts it to its native representation at the
//! boundary.

use glam::{Vec2, Vec3};
use serde::Serialize;

/// A triangle mesh with optional per-vertex UVs.
///
/// Indices are 0-based and local to `positions`; every 3 indices form a
/// triangle. `uvs` may be shorter than `positions` when the source file did
/// not emit a texture coordinate for every vertex.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Mesh {
    /// Vertex positions (one per vertex)
    pub positions: Vec<Vec3>,

    /// Texture coordinates (one per vertex where present)
    pub uvs: Vec<Vec2>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Compute the axis-aligned bounds of the mesh, or `None` when it has no
    /// vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for pos in &self.positions {
            min = min.min(*pos);
            max = max.max(*pos);
        }

        Some((min, max))
    }
}
