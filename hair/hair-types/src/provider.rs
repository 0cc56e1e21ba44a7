//! The read-only boundary to the authoring tool's scene graph.

use crate::{Armature, RawStrand, SkinMesh};

/// Read-only access to the geometry being exported.
///
/// The authoring tool (or a test fixture) implements this against its
/// own scene graph. The pipeline takes a snapshot through it at the
/// start of an export and never mutates or re-reads the scene.
pub trait GeometryProvider {
    /// Number of raw hair strands available.
    fn strand_count(&self) -> usize;

    /// Fetch one raw strand by index, with its local-to-world transform
    /// and optional radius/tilt channels.
    fn strand(&self, index: usize) -> Option<RawStrand>;

    /// The base (skin) mesh hair is anchored and weighted to.
    fn skin_mesh(&self) -> Option<&SkinMesh>;

    /// The collision proxy mesh, if one is assigned.
    fn collision_mesh(&self) -> Option<&SkinMesh>;

    /// The armature driving the skin mesh.
    fn armature(&self) -> Option<&Armature>;

    /// Collect all raw strands.
    fn raw_strands(&self) -> Vec<RawStrand> {
        (0..self.strand_count())
            .filter_map(|i| self.strand(i))
            .collect()
    }
}

/// An in-memory scene snapshot; the simplest [`GeometryProvider`].
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    /// Raw strands, root first.
    pub strands: Vec<RawStrand>,
    /// The base mesh, if any.
    pub skin_mesh: Option<SkinMesh>,
    /// The collision mesh, if any.
    pub collision_mesh: Option<SkinMesh>,
    /// The armature, if any.
    pub armature: Option<Armature>,
}

impl GeometryProvider for SceneSnapshot {
    fn strand_count(&self) -> usize {
        self.strands.len()
    }

    fn strand(&self, index: usize) -> Option<RawStrand> {
        self.strands.get(index).cloned()
    }

    fn skin_mesh(&self) -> Option<&SkinMesh> {
        self.skin_mesh.as_ref()
    }

    fn collision_mesh(&self) -> Option<&SkinMesh> {
        self.collision_mesh.as_ref()
    }

    fn armature(&self) -> Option<&Armature> {
        self.armature.as_ref()
    }
}
