//! Core data model for the hair asset export pipeline.
//!
//! This crate provides the foundational types shared by every export
//! stage:
//!
//! - [`RawStrand`] / [`Strand`] - hair curves before and after resampling
//! - [`SkinMesh`] - the triangulated, UV-mapped, skinned surface mesh
//! - [`Armature`] - the named bone set driving the skin
//! - [`Anchor`] - a strand root bound to a point on the skin surface
//! - [`HairAsset`] / [`CollisionAsset`] - the final serializable assets
//! - [`ExportOptions`] - the immutable, validated export configuration
//! - [`GeometryProvider`] - the read-only boundary to the authoring tool
//!
//! # Units and spaces
//!
//! All coordinates are `f64` and unit-agnostic. Every object carries its
//! own local-to-world `Matrix4`; geometric tests downstream require both
//! operands in the same space and never mix spaces. File formats narrow
//! to `f32` at serialization time only.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod anchor;
mod asset;
mod error;
mod mesh;
mod options;
mod provider;
mod skeleton;
mod strand;

pub use anchor::Anchor;
pub use asset::{
    CollisionAsset, CollisionVertex, HairAsset, HairSkinBlock, HairVertex, SkinningEntry,
    StrandUv,
};
pub use error::{ConfigError, MeshError};
pub use mesh::{SkinMesh, VertexWeight};
pub use options::{BoneExportMode, ExportOptions, VALID_VERTEX_COUNTS};
pub use provider::{GeometryProvider, SceneSnapshot};
pub use skeleton::{Armature, Bone};
pub use strand::{RawStrand, Strand};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

/// Minimum number of strands the consuming simulation engine accepts.
///
/// The engine dispatches one compute thread group per 64 strands, so an
/// export with fewer surviving strands is unusable and must fail.
pub const SIM_THREAD_GROUP_SIZE: usize = 64;

/// Number of bone influences stored per hair root in the skin block.
///
/// Must match the constant compiled into the consuming engine's loader
/// and simulation; do not change it independently.
pub const MAX_INFLUENCES: usize = 16;

/// Number of bone influences stored per vertex in the collision mesh
/// format (four joint-index columns and four weight columns).
pub const COLLISION_MAX_INFLUENCES: usize = 4;
