//! Hierarchy reconstruction from dash-separated sibling paths.
//!
//! Each object may carry a path of 1-based sibling indices locating it under
//! the import root. Paths can arrive in any order and may skip positions, so
//! the builder synthesizes placeholder nodes to fill gaps and populates them
//! in place when the real object shows up later. Sibling order encodes the
//! absolute slot position from the path, never arrival order.

use glam::Vec3;

use crate::mesh::Mesh;
use crate::obj::diagnostic::Diagnostic;
use crate::scene::SceneNode;

/// Everything attached to the resolved node for one validated object.
#[derive(Clone, Debug)]
pub struct NodePayload<M> {
    /// Complete identifier, kept for collision diagnostics.
    pub identifier: String,
    pub name: String,
    pub local_position: Vec3,
    pub mesh: Mesh,
    pub material: Option<M>,
    pub has_collider: bool,
}

#[derive(Clone, Debug)]
enum NodeState {
    Placeholder,
    Populated { identifier: String },
}

#[derive(Clone, Debug)]
struct BuildNode<M> {
    name: String,
    local_position: Vec3,
    mesh: Option<Mesh>,
    material: Option<M>,
    has_collider: bool,
    /// All children in sibling order (arena ids).
    children: Vec<usize>,
    /// The subset of `children` materialized for hierarchy paths, in slot
    /// order. Leaves attached for empty paths never occupy a slot, so the
    /// two lists interleave in `children` but index independently.
    slots: Vec<usize>,
    state: NodeState,
}

impl<M> BuildNode<M> {
    fn placeholder() -> Self {
        Self {
            name: String::new(),
            local_position: Vec3::ZERO,
            mesh: None,
            material: None,
            has_collider: false,
            children: Vec::new(),
            slots: Vec::new(),
            state: NodeState::Placeholder,
        }
    }
}

const ROOT: usize = 0;

/// Builds the output tree from validated objects in file order.
pub struct HierarchyBuilder<M> {
    nodes: Vec<BuildNode<M>>,
}

impl<M> HierarchyBuilder<M> {
    pub fn new(root_name: &str) -> Self {
        let mut root = BuildNode::placeholder();
        root.name = root_name.to_string();
        root.state = NodeState::Populated {
            identifier: root_name.to_string(),
        };

        Self { nodes: vec![root] }
    }

    /// Attach one object's payload at the position its path demands.
    ///
    /// An empty path appends a leaf directly under the import root in
    /// encounter order. A path containing an index below 1 (including the
    /// decode sentinel) cannot resolve; the object is attached under the
    /// root with a diagnostic rather than dropped.
    pub fn attach(
        &mut self,
        path: &[i32],
        payload: NodePayload<M>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if path.is_empty() {
            self.attach_under_root(payload);
            return;
        }

        if path.iter().any(|&index| index < 1) {
            log::warn!(
                "object `{}`: unresolvable hierarchy path {:?}, attaching under the root",
                payload.identifier,
                path
            );
            diagnostics.push(Diagnostic::UnresolvedPath {
                object: payload.identifier.clone(),
            });
            self.attach_under_root(payload);
            return;
        }

        let mut current = ROOT;
        for &index in path {
            let required = index as usize;
            while self.nodes[current].slots.len() < required {
                let id = self.alloc(BuildNode::placeholder());
                let parent = &mut self.nodes[current];
                parent.children.push(id);
                parent.slots.push(id);
            }
            current = self.nodes[current].slots[required - 1];
        }

        self.populate(current, payload, diagnostics);
    }

    /// Consume the builder and materialize the owned tree.
    pub fn finish(self) -> SceneNode<M> {
        fn take<M>(nodes: &mut [Option<BuildNode<M>>], id: usize) -> SceneNode<M> {
            let node = nodes[id].take().expect("node owned by exactly one parent");
            let children = node
                .children
                .iter()
                .map(|&child| take(nodes, child))
                .collect();

            SceneNode {
                name: node.name,
                local_position: node.local_position,
                mesh: node.mesh,
                material: node.material,
                has_collider: node.has_collider,
                children,
            }
        }

        let mut nodes: Vec<Option<BuildNode<M>>> = self.nodes.into_iter().map(Some).collect();
        take(&mut nodes, ROOT)
    }

    fn attach_under_root(&mut self, payload: NodePayload<M>) {
        let mut node = BuildNode::placeholder();
        Self::fill(&mut node, payload);
        let id = self.alloc(node);
        self.nodes[ROOT].children.push(id);
    }

    fn populate(&mut self, id: usize, payload: NodePayload<M>, diagnostics: &mut Vec<Diagnostic>) {
        if let NodeState::Populated { identifier } = &self.nodes[id].state {
            log::warn!(
                "object `{}` resolves to the slot already held by `{}`, overwriting",
                payload.identifier,
                identifier
            );
            diagnostics.push(Diagnostic::PathCollision {
                object: payload.identifier.clone(),
                previous: identifier.clone(),
            });
        }

        // Populate in place: children gathered under a placeholder survive.
        Self::fill(&mut self.nodes[id], payload);
    }

    fn fill(node: &mut BuildNode<M>, payload: NodePayload<M>) {
        node.name = payload.name;
        node.local_position = payload.local_position;
        node.mesh = Some(payload.mesh);
        node.material = payload.material;
        node.has_collider = payload.has_collider;
        node.state = NodeState::Populated {
            identifier: payload.identifier,
        };
    }

    fn alloc(&mut self, node: BuildNode<M>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }
}
