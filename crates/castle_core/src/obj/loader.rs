//! High-level import entry points.
//!
//! This module wires the pipeline together: parse the document into
//! descriptors, drop empty ones, validate geometry, resolve materials, and
//! build the node tree. Fatal problems return an error and no tree;
//! everything recoverable lands in the returned diagnostic list.

use std::path::Path;

use thiserror::Error;

use crate::material::MaterialResolver;
use crate::mesh::Mesh;
use crate::obj::diagnostic::Diagnostic;
use crate::obj::header::ObjectDescriptor;
use crate::obj::hierarchy::{HierarchyBuilder, NodePayload};
use crate::obj::parser::{ObjParser, ParseError};
use crate::obj::validate::validate;
use crate::scene::SceneNode;

/// Errors that abort an import entirely.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// A finished import: the scene tree plus every recoverable diagnostic.
#[derive(Clone, Debug)]
pub struct Import<M> {
    pub root: SceneNode<M>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Import a document given as a sequence of lines.
///
/// `name` becomes the root node's name. The resolver must be populated
/// before the call; it is consulted exactly once per object that references
/// a visible material.
///
/// The pipeline is single-threaded and runs to completion or to the first
/// fatal error; there is no cancellation.
pub fn import<M, I, S>(
    lines: I,
    name: &str,
    resolver: &MaterialResolver<M>,
) -> ImportResult<Import<M>>
where
    M: Clone,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (descriptors, mut diagnostics) = ObjParser::parse(lines)?;
    let total = descriptors.len();

    let mut builder = HierarchyBuilder::new(name);
    let mut kept = 0usize;

    for mut descriptor in descriptors {
        if let Err(reason) = validate(&descriptor) {
            log::warn!(
                "dropping object `{}`: {}",
                descriptor.complete_identifier,
                reason
            );
            diagnostics.push(Diagnostic::InvalidGeometry {
                object: descriptor.complete_identifier,
                reason,
            });
            continue;
        }

        kept += 1;
        let path = std::mem::take(&mut descriptor.hierarchy_path);
        let payload = node_payload(descriptor, resolver, &mut diagnostics);
        builder.attach(&path, payload, &mut diagnostics);
    }

    log::info!(
        "imported `{}`: kept {} of {} objects, {} diagnostics",
        name,
        kept,
        total,
        diagnostics.len()
    );

    Ok(Import {
        root: builder.finish(),
        diagnostics,
    })
}

/// Import a document held in a single string.
pub fn import_str<M: Clone>(
    content: &str,
    name: &str,
    resolver: &MaterialResolver<M>,
) -> ImportResult<Import<M>> {
    import(content.lines(), name, resolver)
}

/// Import a file, deriving the root node's name from the file stem.
pub fn import_file<M: Clone, P: AsRef<Path>>(
    path: P,
    resolver: &MaterialResolver<M>,
) -> ImportResult<Import<M>> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let content = std::fs::read_to_string(path)?;
    import_str(&content, name, resolver)
}

/// Convert a validated descriptor into the node payload, resolving its
/// material on the way.
fn node_payload<M: Clone>(
    descriptor: ObjectDescriptor,
    resolver: &MaterialResolver<M>,
    diagnostics: &mut Vec<Diagnostic>,
) -> NodePayload<M> {
    let material = match descriptor.material_identifier.as_str() {
        // No renderer for this node.
        "" | "Invisible" => None,
        identifier => match resolver.resolve(identifier) {
            Some(handle) => Some(handle),
            None => {
                log::warn!(
                    "object `{}`: material `{}` is not registered",
                    descriptor.complete_identifier,
                    identifier
                );
                diagnostics.push(Diagnostic::UnknownMaterial {
                    object: descriptor.complete_identifier.clone(),
                    identifier: identifier.to_string(),
                });
                None
            }
        },
    };

    // Validation guarantees every index is in 0..vertices.len().
    let indices = descriptor
        .triangle_indices
        .iter()
        .map(|&index| index as u32)
        .collect();

    NodePayload {
        identifier: descriptor.complete_identifier,
        name: descriptor.display_name,
        local_position: descriptor.local_position,
        mesh: Mesh {
            positions: descriptor.vertices,
            uvs: descriptor.uvs,
            indices,
        },
        material,
        has_collider: descriptor.has_collider,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::validate::GeometryError;
    use glam::Vec3;

    fn resolver_with(names: &[&str]) -> MaterialResolver<String> {
        let mut resolver = MaterialResolver::new();
        for &name in names {
            resolver.register(name, name.to_string());
        }
        resolver
    }

    #[test]
    fn test_end_to_end_scenario() {
        let content = "\
o Name = A - Material = Red - Collider = True
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o Name = B - Hierarchy position = 1
v 0 0 0
v 1 0 0
v 0 1 0
f 4 5 6
";

        let import = import_str(content, "castle", &resolver_with(&["Red"])).unwrap();
        assert!(import.diagnostics.is_empty());

        let root = &import.root;
        assert_eq!(root.name, "castle");
        assert_eq!(root.children.len(), 2);

        let a = &root.children[0];
        assert_eq!(a.name, "A");
        assert!(a.has_collider);
        assert_eq!(a.material.as_deref(), Some("Red"));

        let mesh = a.mesh.as_ref().unwrap();
        assert_eq!(mesh.indices, vec![0, 2, 1]);
        assert_eq!(mesh.positions[1], Vec3::new(-1.0, 0.0, 0.0));

        // B occupies hierarchy slot 1 and its numbering starts fresh at 0
        // despite A's 3 vertices coming first in the document.
        let b = &root.children[1];
        assert_eq!(b.name, "B");
        let mesh = b.mesh.as_ref().unwrap();
        assert_eq!(mesh.indices, vec![0, 2, 1]);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_invisible_material_skips_resolver() {
        let content = "\
o Name = A - Material = Invisible
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        // Nothing registered; an "Invisible" object must not produce an
        // unknown-material diagnostic.
        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        assert!(import.diagnostics.is_empty());
        assert!(import.root.children[0].material.is_none());
    }

    #[test]
    fn test_unknown_material_is_recoverable() {
        let content = "\
o Name = A - Material = Gold
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        assert_eq!(
            import.diagnostics,
            vec![Diagnostic::UnknownMaterial {
                object: "Name = A - Material = Gold".to_string(),
                identifier: "Gold".to_string(),
            }]
        );

        let a = &import.root.children[0];
        assert_eq!(a.name, "A");
        assert!(a.material.is_none());
        assert!(a.mesh.is_some());
    }

    #[test]
    fn test_quoted_material_resolves() {
        let content = "\
o Name = A - Material = \"Red\"
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let import = import_str(content, "castle", &resolver_with(&["Red"])).unwrap();
        assert!(import.diagnostics.is_empty());
        assert_eq!(import.root.children[0].material.as_deref(), Some("Red"));
    }

    #[test]
    fn test_invalid_geometry_dropped_with_diagnostic() {
        let content = "\
o Name = Good
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o Name = Degenerate
v 0 0 0
v 0 0 0
v 1 0 0
f 4 5 6
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        assert_eq!(import.root.children.len(), 1);
        assert_eq!(import.root.children[0].name, "Good");
        assert_eq!(
            import.diagnostics,
            vec![Diagnostic::InvalidGeometry {
                object: "Name = Degenerate".to_string(),
                reason: GeometryError::DegenerateTriangle { triangle: 0 },
            }]
        );
    }

    #[test]
    fn test_object_without_geometry_gets_diagnostic() {
        let content = "\
o Name = Empty
o Name = Good
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        assert_eq!(import.root.children.len(), 1);
        assert_eq!(
            import.diagnostics,
            vec![Diagnostic::InvalidGeometry {
                object: "Name = Empty".to_string(),
                reason: GeometryError::NoVertices,
            }]
        );
    }

    #[test]
    fn test_local_position_lands_on_node() {
        let content = "\
o Name = A - Local position = (1, 2, 3)
v 4 5 6
v 7 8 9
v 0 1 0
f 1 2 3
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        let a = &import.root.children[0];
        assert_eq!(a.local_position, Vec3::new(1.0, 2.0, 3.0));
        // Vertices are untouched by the node position, only X-mirrored.
        assert_eq!(a.mesh.as_ref().unwrap().positions[0], Vec3::new(-4.0, 5.0, 6.0));
    }

    #[test]
    fn test_hierarchy_determinism() {
        let content = "\
o Name = One - Hierarchy position = 1
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o Name = Three - Hierarchy position = 3
v 0 0 0
v 1 0 0
v 0 1 0
f 4 5 6
o Name = Two - Hierarchy position = 2
v 0 0 0
v 1 0 0
v 0 1 0
f 7 8 9
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        let names: Vec<_> = import
            .root
            .children
            .iter()
            .map(|child| child.name.as_str())
            .collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_sentinel_hierarchy_token_falls_back_to_root() {
        let content = "\
o Name = Lost - Hierarchy position = 1-x
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

        let import = import_str(content, "castle", &resolver_with(&[])).unwrap();
        assert_eq!(import.root.children.len(), 1);
        assert_eq!(import.root.children[0].name, "Lost");
        assert!(import.root.children[0].mesh.is_some());

        // Both the decode failure and the placement fallback are reported.
        assert_eq!(import.diagnostics.len(), 2);
        assert!(matches!(
            &import.diagnostics[0],
            Diagnostic::HierarchyIndex { token, .. } if token == "x"
        ));
        assert!(matches!(
            &import.diagnostics[1],
            Diagnostic::UnresolvedPath { .. }
        ));
    }

    #[test]
    fn test_fatal_error_returns_no_tree() {
        let result = import_str::<String>("o A\nv 0 zero 0\n", "castle", &resolver_with(&[]));
        assert!(matches!(result, Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = import_file::<String, _>("/no/such/file.obj", &resolver_with(&[]));
        assert!(matches!(result, Err(ImportError::Io(_))));
    }
}
