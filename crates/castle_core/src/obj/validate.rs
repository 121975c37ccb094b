//! Geometry validation for finalized descriptors.

use thiserror::Error;

use crate::obj::header::ObjectDescriptor;

/// Why a descriptor's geometry was rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("mesh has no triangle indices")]
    NoTriangles,

    #[error("triangle index {index} falls outside the {vertex_count} local vertices")]
    IndexOutOfRange { index: i32, vertex_count: usize },

    #[error("triangle {triangle} references the same vertex position more than once")]
    DegenerateTriangle { triangle: usize },

    #[error("triangle {triangle} references a vertex at infinity")]
    InfiniteVertex { triangle: usize },
}

/// Validate a finalized descriptor, short-circuiting on the first failing
/// rule.
///
/// Pure and idempotent: re-running on an accepted descriptor accepts again.
/// Rejection is always per-object; the caller drops the descriptor with a
/// diagnostic and keeps importing.
pub fn validate(descriptor: &ObjectDescriptor) -> Result<(), GeometryError> {
    if descriptor.vertices.is_empty() {
        return Err(GeometryError::NoVertices);
    }

    if descriptor.triangle_indices.is_empty() {
        return Err(GeometryError::NoTriangles);
    }

    let vertex_count = descriptor.vertices.len();
    for &index in &descriptor.triangle_indices {
        if index < 0 || index as usize >= vertex_count {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
    }

    for (triangle, triple) in descriptor.triangle_indices.chunks_exact(3).enumerate() {
        let a = descriptor.vertices[triple[0] as usize];
        let b = descriptor.vertices[triple[1] as usize];
        let c = descriptor.vertices[triple[2] as usize];

        // Bit-exact comparison; near-degenerate slivers are accepted.
        if a == b || a == c || b == c {
            return Err(GeometryError::DegenerateTriangle { triangle });
        }
    }

    for (triangle, triple) in descriptor.triangle_indices.chunks_exact(3).enumerate() {
        for &index in triple {
            let vertex = descriptor.vertices[index as usize];
            if vertex.x.is_infinite() || vertex.y.is_infinite() || vertex.z.is_infinite() {
                return Err(GeometryError::InfiniteVertex { triangle });
            }
        }
    }

    Ok(())
}
