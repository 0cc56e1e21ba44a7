//! Error types for skin-weight resolution.

use thiserror::Error;

/// Errors that can occur while resolving bone weights.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkinBindingError {
    /// No permitted bone has positive weight on the resolved vertex.
    #[error("no bone weights qualify for vertex {vertex} under the active bone filter")]
    NoQualifyingBones {
        /// The vertex with no qualifying weights.
        vertex: usize,
    },

    /// An anchor names a triangle the mesh does not have.
    #[error("anchor references triangle {triangle} but mesh has {triangle_count} triangles")]
    AnchorTriangleOutOfRange {
        /// The referenced triangle index.
        triangle: usize,
        /// Triangles in the mesh.
        triangle_count: usize,
    },
}
