//! Final serializable asset types.
//!
//! These are the exact shapes written to disk. The JSON field names are
//! part of the `.tfxjson` wire format consumed by existing engine
//! loaders, hence the camelCase renames.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::COLLISION_MAX_INFLUENCES;

/// One hair vertex: position plus inverse mass in the w component.
///
/// Inverse mass 0 marks the vertex as immovable (pinned); the first two
/// vertices of every strand are always pinned.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HairVertex {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Z position.
    pub z: f32,
    /// Inverse mass: 0 = immovable, 1 = free.
    pub w: f32,
}

/// Per-strand root UV on the skin surface.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StrandUv {
    /// U coordinate.
    pub x: f32,
    /// V coordinate.
    pub y: f32,
}

/// One bone influence in the skin block; pad entries carry weight 0 and
/// an empty bone name.
#[derive(Debug, Clone, Serialize)]
pub struct SkinningEntry {
    /// Influence weight. Not renormalized for hair anchors.
    pub weight: f64,
    /// Name of the influencing bone; empty for pad entries.
    #[serde(rename = "boneName")]
    pub bone_name: String,
    /// Debug provenance: the mesh vertex the weights came from.
    #[serde(rename = "sourceVertIndex", skip_serializing_if = "Option::is_none")]
    pub source_vert_index: Option<u32>,
    /// Debug provenance: the strand this entry belongs to.
    #[serde(rename = "rootIndex", skip_serializing_if = "Option::is_none")]
    pub root_index: Option<u32>,
}

/// The embedded skin-binding block of a hair asset.
///
/// `skinning_data` is strand-major and flat: exactly
/// [`MAX_INFLUENCES`](crate::MAX_INFLUENCES) entries per strand, weight
/// descending within a strand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HairSkinBlock {
    /// Flat influence list, strand-major.
    #[serde(rename = "skinningData")]
    pub skinning_data: Vec<SkinningEntry>,
    /// Number of strands covered by `skinning_data`.
    #[serde(rename = "numGuideStrands")]
    pub num_guide_strands: usize,
    /// Referenced bone names, in order of first use.
    #[serde(rename = "bonesList")]
    pub bones_list: Vec<String>,
    /// Debug provenance: anchors resolved by ray intersection.
    #[serde(rename = "totalIntersects", skip_serializing_if = "Option::is_none")]
    pub total_intersects: Option<usize>,
}

/// The complete hair asset, as serialized to `.tfx` and `.tfxjson`.
#[derive(Debug, Clone, Serialize)]
pub struct HairAsset {
    /// Per-strand vertex arrays; every inner array has
    /// `num_vertices_per_strand` entries.
    pub positions: Vec<Vec<HairVertex>>,
    /// Per-strand root UVs, parallel to `positions`.
    pub uvs: Vec<StrandUv>,
    /// Number of strands.
    #[serde(rename = "numHairStrands")]
    pub num_hair_strands: usize,
    /// Vertices per strand (4, 8, 16 or 32).
    #[serde(rename = "numVerticesPerStrand")]
    pub num_vertices_per_strand: usize,
    /// Debug provenance: strands discarded by the inside-mesh test.
    #[serde(rename = "totalNumInside", skip_serializing_if = "Option::is_none")]
    pub total_num_inside: Option<usize>,
    /// Embedded skin-binding block.
    #[serde(rename = "tfxBoneData")]
    pub skin: HairSkinBlock,
}

/// One collision mesh vertex with its skinning data.
#[derive(Debug, Clone)]
pub struct CollisionVertex {
    /// Position in mesh-local space.
    pub position: Point3<f64>,
    /// Unit normal.
    pub normal: Vector3<f64>,
    /// Indices into [`CollisionAsset::bones`]; pad slots are 0.
    pub joints: [u32; COLLISION_MAX_INFLUENCES],
    /// Influence weights, renormalized to sum to 1; pad slots are 0.
    pub weights: [f64; COLLISION_MAX_INFLUENCES],
}

/// The collision proxy asset, as serialized to `.tfxmesh`.
#[derive(Debug, Clone, Default)]
pub struct CollisionAsset {
    /// Referenced bone names, in order of first use.
    pub bones: Vec<String>,
    /// Skinned vertices.
    pub vertices: Vec<CollisionVertex>,
    /// Triangle faces as vertex index triples.
    pub triangles: Vec<[u32; 3]>,
}
