//! Object-header metadata decoding.
//!
//! The authoring tool packs per-object metadata into the object name line:
//! segments joined by `" - "`, each segment either `key = value` or a bare
//! legacy value, e.g.
//!
//! ```text
//! o Name = Tower - Material = Stone - Collider = True - Hierarchy position = 2-1
//! ```

use glam::{Vec2, Vec3};

use crate::obj::diagnostic::Diagnostic;

/// Sentinel stored for a hierarchy token that failed to parse.
///
/// A path containing it can never resolve; the builder falls back to
/// attaching the object directly under the import root.
pub const INVALID_HIERARCHY_INDEX: i32 = -1;

/// One parsed object header plus the geometry accumulated for it.
///
/// `triangle_indices` are always 0-based and local to `vertices`, re-based
/// from the file's document-global numbering by the parser.
#[derive(Clone, Debug)]
pub struct ObjectDescriptor {
    /// Raw header text, the object's stable key for diagnostics.
    pub complete_identifier: String,

    /// Defaults to the raw header text, overridden by a `Name` segment.
    pub display_name: String,

    /// Empty or the literal `"Invisible"` means the node gets no renderer.
    pub material_identifier: String,

    pub has_collider: bool,

    pub local_position: Vec3,

    /// 1-based sibling indices from the import root; empty means "attach
    /// directly under the root".
    pub hierarchy_path: Vec<i32>,

    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangle_indices: Vec<i32>,
}

impl Default for ObjectDescriptor {
    fn default() -> Self {
        Self {
            complete_identifier: String::new(),
            display_name: String::new(),
            material_identifier: String::new(),
            has_collider: true,
            local_position: Vec3::ZERO,
            hierarchy_path: Vec::new(),
            vertices: Vec::new(),
            uvs: Vec::new(),
            triangle_indices: Vec::new(),
        }
    }
}

impl ObjectDescriptor {
    /// Decode an object header into a descriptor.
    ///
    /// Recoverable decode problems (malformed local position, non-numeric
    /// hierarchy token) push a [`Diagnostic`] and leave the affected field at
    /// its default; decoding always continues. Unrecognized keys are ignored
    /// for forward compatibility, and a later duplicate key overwrites an
    /// earlier one.
    pub fn from_header(header: &str, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut descriptor = Self {
            complete_identifier: header.to_string(),
            display_name: header.to_string(),
            ..Self::default()
        };

        for segment in header.split(" - ") {
            if segment.is_empty() {
                continue;
            }

            let (key, value) = match segment.split_once(" = ") {
                Some((key, value)) => (key, value),
                // Legacy unnamed form: the whole segment is a bare value with
                // no key, already preserved in `complete_identifier`.
                None => ("", segment),
            };

            match key {
                "Name" => descriptor.display_name = value.to_string(),
                "Material" => descriptor.material_identifier = value.to_string(),
                "Collider" => descriptor.has_collider = value == "True" || value == "true",
                "Local position" => match parse_local_position(value) {
                    Some(position) => descriptor.local_position = position,
                    None => {
                        log::warn!(
                            "object `{}`: local position `{}` did not parse, keeping origin",
                            header,
                            value
                        );
                        diagnostics.push(Diagnostic::LocalPosition {
                            object: header.to_string(),
                            value: value.to_string(),
                        });
                    }
                },
                "Hierarchy position" => {
                    descriptor.hierarchy_path = parse_hierarchy_path(value, header, diagnostics);
                }
                _ => {}
            }
        }

        descriptor
    }

    /// True only for the implicit descriptor opened at stream start when no
    /// stray geometry preceded the first header. Empty descriptors are
    /// dropped silently, before validation.
    pub fn is_empty(&self) -> bool {
        self.complete_identifier.is_empty()
            && self.vertices.is_empty()
            && self.triangle_indices.is_empty()
            && self.uvs.is_empty()
    }
}

/// Parse a `Local position` value like `(1.5, 2, -3)`.
///
/// One leading and one trailing bracket character are stripped generically
/// (only the first and last character), so any single bracket pair works.
fn parse_local_position(value: &str) -> Option<Vec3> {
    let mut inner = value.chars();
    inner.next();
    inner.next_back();

    let mut axes = inner.as_str().split(", ");
    let x = axes.next()?.parse().ok()?;
    let y = axes.next()?.parse().ok()?;
    let z = axes.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

/// Parse a `Hierarchy position` value like `2-1-3`.
///
/// A non-numeric token becomes [`INVALID_HIERARCHY_INDEX`] with a diagnostic
/// and decoding continues; resolution fails gracefully later instead.
fn parse_hierarchy_path(value: &str, header: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<i32> {
    value
        .split('-')
        .map(|token| {
            token.parse().unwrap_or_else(|_| {
                log::warn!(
                    "object `{}`: hierarchy index `{}` is not an integer",
                    header,
                    token
                );
                diagnostics.push(Diagnostic::HierarchyIndex {
                    object: header.to_string(),
                    token: token.to_string(),
                });
                INVALID_HIERARCHY_INDEX
            })
        })
        .collect()
}
