//! Recoverable import diagnostics.

use thiserror::Error;

use crate::obj::validate::GeometryError;

/// A recoverable problem recorded during import.
///
/// Diagnostics never abort the pipeline; they accumulate and ride along with
/// whatever tree was built. Each carries the complete identifier of the
/// object it concerns so the caller can trace it back to the source file.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Diagnostic {
    #[error("object `{object}`: local position `{value}` is not a bracketed float triple, keeping origin")]
    LocalPosition { object: String, value: String },

    #[error("object `{object}`: hierarchy index `{token}` is not an integer")]
    HierarchyIndex { object: String, token: String },

    #[error("object `{object}` dropped: {reason}")]
    InvalidGeometry {
        object: String,
        reason: GeometryError,
    },

    #[error("object `{object}`: material `{identifier}` is not registered, node gets no material")]
    UnknownMaterial { object: String, identifier: String },

    #[error("object `{object}`: hierarchy path contains an unresolvable index, attaching under the root")]
    UnresolvedPath { object: String },

    #[error("object `{object}` resolves to the same hierarchy slot as `{previous}`, later object wins")]
    PathCollision { object: String, previous: String },
}

impl Diagnostic {
    /// The complete identifier of the object this diagnostic concerns.
    pub fn object(&self) -> &str {
        match self {
            Diagnostic::LocalPosition { object, .. }
            | Diagnostic::HierarchyIndex { object, .. }
            | Diagnostic::InvalidGeometry { object, .. }
            | Diagnostic::UnknownMaterial { object, .. }
            | Diagnostic::UnresolvedPath { object }
            | Diagnostic::PathCollision { object, .. } => object,
        }
    }
}
