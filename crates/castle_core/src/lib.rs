//! Castle Core - scene import for the castle authoring exchange format.
//!
//! This crate provides:
//!
//! - **Scene types**: [`SceneNode`], [`Mesh`], plain data records the host
//!   engine adapts to its native objects
//! - **Import pipeline**: parsing, validation, index re-basing, and
//!   hierarchy reconstruction for the metadata-extended OBJ dialect
//! - **Material boundary**: [`MaterialResolver`], mapping names to the
//!   host's opaque handles
//!
//! # Example
//!
//! ```ignore
//! use castle_core::{import_file, MaterialResolver};
//!
//! let mut materials = MaterialResolver::new();
//! materials.register("Stone", stone_handle);
//!
//! let import = import_file("exports/castle.obj", &materials)?;
//! println!("{} nodes, {} diagnostics",
//!     import.root.node_count(),
//!     import.diagnostics.len());
//! ```

pub mod material;
pub mod mesh;
pub mod obj;
pub mod scene;

// Re-export commonly used types
pub use material::MaterialResolver;
pub use mesh::Mesh;
pub use obj::{import, import_file, import_str, Diagnostic, Import, ImportError};
pub use scene::SceneNode;
