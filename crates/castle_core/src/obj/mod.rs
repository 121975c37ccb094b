//! Import pipeline for the castle exchange format.
//!
//! The format is a Wavefront OBJ dialect where each object's `o` line packs
//! metadata into the name: display name, material identifier, collider flag,
//! local position, and a dash-separated hierarchy path of 1-based sibling
//! indices. Vertices and faces use document-global numbering.
//!
//! The pipeline runs in file order, one pass each:
//!
//! 1. [`Record`] classifies raw lines.
//! 2. [`ObjParser`] decodes headers ([`ObjectDescriptor`]) and accumulates
//!    geometry, re-basing face indices to be object-local.
//! 3. [`validate`] drops descriptors with broken geometry, each with a
//!    diagnostic.
//! 4. [`HierarchyBuilder`] materializes the node tree from hierarchy paths,
//!    synthesizing placeholders for skipped positions.
//!
//! [`import`] and friends wire the stages together.

mod diagnostic;
mod header;
mod hierarchy;
mod loader;
mod parser;
mod record;
mod validate;

pub use diagnostic::*;
pub use header::*;
pub use hierarchy::*;
pub use loader::*;
pub use parser::*;
pub use record::*;
pub use validate::*;
