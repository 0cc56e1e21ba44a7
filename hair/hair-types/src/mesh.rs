//! The skinned surface mesh that hair strands attach to.

use hashbrown::HashSet;
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::MeshError;

/// One bone influence on a mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexWeight {
    /// Name of the influencing bone (vertex group).
    pub bone: String,
    /// Influence weight; only weights > 0 are meaningful.
    pub weight: f64,
}

impl VertexWeight {
    /// Create a new vertex weight.
    #[must_use]
    pub fn new(bone: impl Into<String>, weight: f64) -> Self {
        Self {
            bone: bone.into(),
            weight,
        }
    }
}

/// A skinned surface mesh snapshot from the [`GeometryProvider`].
///
/// Faces are stored as authored (polygonal); the export pipeline requires
/// full triangulation and validates it once through [`SkinMesh::triangles`].
/// UVs come from the single active UV channel, stored per face corner.
/// Bone weights are stored per vertex.
///
/// [`GeometryProvider`]: crate::GeometryProvider
#[derive(Debug, Clone, Default)]
pub struct SkinMesh {
    /// Vertex positions in mesh-local space.
    pub positions: Vec<Point3<f64>>,

    /// Per-vertex unit normals, parallel to `positions`.
    pub normals: Vec<Vector3<f64>>,

    /// Faces as vertex index lists. Must be triangles for export.
    pub faces: Vec<Vec<u32>>,

    /// Active-channel UVs per face corner, parallel to `faces`.
    pub corner_uvs: Vec<Vec<[f64; 2]>>,

    /// Bone influences per vertex, parallel to `positions`.
    pub weights: Vec<Vec<VertexWeight>>,

    /// Mesh-local to world transform.
    pub world_from_local: Matrix4<f64>,
}

impl SkinMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether the mesh carries an active UV channel for all faces.
    #[must_use]
    pub fn has_uvs(&self) -> bool {
        !self.corner_uvs.is_empty() && self.corner_uvs.len() == self.faces.len()
    }

    /// Validate triangulation and return the faces as index triples.
    ///
    /// Faces that carry corner UVs must carry exactly one UV per corner;
    /// UV lookups downstream index them unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NonTriangularFace`] for the first face that is
    /// not a triangle, or [`MeshError::CornerUvMismatch`] for the first
    /// face whose UV list is not three entries long.
    pub fn triangles(&self) -> Result<Vec<[u32; 3]>, MeshError> {
        let mut triangles = Vec::with_capacity(self.faces.len());
        for (face, indices) in self.faces.iter().enumerate() {
            match indices.as_slice() {
                &[i0, i1, i2] => {
                    if let Some(uvs) = self.corner_uvs.get(face) {
                        if uvs.len() != 3 {
                            return Err(MeshError::CornerUvMismatch {
                                face,
                                got: uvs.len(),
                            });
                        }
                    }
                    triangles.push([i0, i1, i2]);
                }
                other => {
                    return Err(MeshError::NonTriangularFace {
                        face,
                        corners: other.len(),
                    })
                }
            }
        }
        Ok(triangles)
    }

    /// Names of bones that have a non-empty vertex group on this mesh,
    /// i.e. at least one vertex with weight > 0.
    #[must_use]
    pub fn vertex_group_names(&self) -> HashSet<&str> {
        let mut names = HashSet::new();
        for vertex_weights in &self.weights {
            for vw in vertex_weights {
                if vw.weight > 0.0 {
                    names.insert(vw.bone.as_str());
                }
            }
        }
        names
    }

    /// Weight of `bone` on the given vertex, if the vertex is in that
    /// bone's group with positive weight.
    #[must_use]
    pub fn bone_weight(&self, vertex: usize, bone: &str) -> Option<f64> {
        self.weights.get(vertex)?.iter().find_map(|vw| {
            if vw.bone == bone && vw.weight > 0.0 {
                Some(vw.weight)
            } else {
                None
            }
        })
    }

    /// World to mesh-local transform, if the world transform is invertible.
    #[must_use]
    pub fn local_from_world(&self) -> Option<Matrix4<f64>> {
        self.world_from_local.try_inverse()
    }
}
