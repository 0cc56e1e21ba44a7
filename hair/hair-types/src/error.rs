//! Shared error types for configuration and mesh validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::options::BoneExportMode;

/// Configuration errors detected at pipeline entry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Vertices per strand is not one of the supported counts.
    #[error("invalid vertices per strand: {got} (must be 4, 8, 16 or 32)")]
    InvalidVerticesPerStrand {
        /// The rejected value.
        got: usize,
    },

    /// Minimum curve length is negative or not finite.
    #[error("minimum curve length must be finite and >= 0, got {got}")]
    InvalidMinimumCurveLength {
        /// The rejected value.
        got: f64,
    },

    /// Whitelist/blacklist mode with no bones named.
    #[error("bone export mode {mode:?} requires a non-empty bone set")]
    EmptyBoneSet {
        /// The mode that needs a bone set.
        mode: BoneExportMode,
    },

    /// No base (skin) mesh in the scene snapshot.
    #[error("no base mesh selected")]
    MissingBaseMesh,

    /// No collision mesh in the scene snapshot.
    #[error("no collision mesh selected")]
    MissingCollisionMesh,

    /// The base mesh has no active UV channel.
    #[error("no UV channel found on the base mesh")]
    MissingUvChannel,

    /// Bone export requires an armature but none is present.
    #[error("no armature found on the mesh")]
    MissingArmature,

    /// The output directory does not exist.
    #[error("output directory does not exist: {path}")]
    MissingOutputDirectory {
        /// The missing directory.
        path: PathBuf,
    },

    /// The mesh world transform is singular and cannot be inverted.
    #[error("mesh world transform is not invertible")]
    SingularMeshTransform,
}

/// Mesh validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face with a corner count other than 3.
    #[error("mesh must be triangulated: face {face} has {corners} corners")]
    NonTriangularFace {
        /// Index of the offending face.
        face: usize,
        /// Its corner count.
        corners: usize,
    },

    /// A face whose corner-UV list does not have one UV per corner.
    #[error("face {face} has {got} corner UVs (expected 3)")]
    CornerUvMismatch {
        /// Index of the offending face.
        face: usize,
        /// UV count found on it.
        got: usize,
    },

    /// Vertex normals missing or not parallel to the positions.
    #[error("mesh has {got} normals for {expected} vertices")]
    NormalCountMismatch {
        /// Normal count found.
        got: usize,
        /// Vertex count the normals must match.
        expected: usize,
    },

    /// The mesh has no faces at all.
    #[error("mesh has no faces")]
    Empty,
}
