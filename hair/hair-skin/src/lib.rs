//! Bone filtering and skin-weight resolution.
//!
//! Given a skinned mesh and an armature, this crate answers two
//! questions the export pipeline asks per strand and per collision
//! vertex:
//!
//! - which bones are allowed to appear in the output at all
//!   ([`permitted_bones`]), and
//! - for one vertex or strand anchor, what is its bounded, sorted,
//!   zero-padded bone-weight list ([`resolve_vertex`],
//!   [`resolve_anchor`]).
//!
//! Weight lists always come back with exactly the requested number of
//! influences, descending by weight, padded with empty-name zero-weight
//! sentinels. A vertex with no qualifying weight under the active filter
//! is a hard error; partial skinning data would desynchronize the
//! simulation from the render mesh.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod resolve;

pub use error::SkinBindingError;
pub use resolve::{permitted_bones, resolve_anchor, resolve_vertex, AnchorBinding, BoneBinding};
