//! Scene tree handed to the host.
//!
//! The importer builds a tree of [`SceneNode`]s and passes ownership to the
//! caller; no node is shared or revisited after the import returns. The host
//! engine's adapter walks the tree and instantiates its native scene objects.

use glam::Vec3;
use serde::Serialize;

use crate::mesh::Mesh;

/// A node in the imported scene tree.
///
/// `M` is the host's opaque material handle. The importer never constructs
/// one itself; it only copies handles out of the resolver.
///
/// Nodes synthesized to fill a gap in a hierarchy path carry an empty name,
/// a default transform, and no mesh. A later object whose path lands on such
/// a node populates it in place, so children accumulated underneath survive.
#[derive(Clone, Debug, Serialize)]
pub struct SceneNode<M> {
    pub name: String,

    pub local_position: Vec3,

    /// Absent for the import root and for ancestor-only placeholder nodes.
    pub mesh: Option<Mesh>,

    pub material: Option<M>,

    pub has_collider: bool,

    /// Sibling order; 0-based even though hierarchy paths in the source file
    /// are 1-based.
    pub children: Vec<SceneNode<M>>,
}

impl<M> SceneNode<M> {
    /// Create an empty container node (used for the import root and for
    /// placeholder ancestors).
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_position: Vec3::ZERO,
            mesh: None,
            material: None,
            has_collider: false,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Number of nodes in this subtree that carry a mesh.
    pub fn mesh_count(&self) -> usize {
        usize::from(self.mesh.is_some())
            + self.children.iter().map(SceneNode::mesh_count).sum::<usize>()
    }

    /// Total triangle count across every mesh in this subtree.
    pub fn total_triangle_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, Mesh::triangle_count)
            + self
                .children
                .iter()
                .map(SceneNode::total_triangle_count)
                .sum::<usize>()
    }
}
