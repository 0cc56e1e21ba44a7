//! Bone filtering and per-vertex / per-anchor weight resolution.

use hashbrown::HashSet;
use smallvec::SmallVec;

use hair_types::{Anchor, Armature, BoneExportMode, SkinMesh, VertexWeight, MAX_INFLUENCES};

use crate::SkinBindingError;

/// A bounded bone-weight list, descending by weight, zero-padded.
pub type BoneBinding = SmallVec<[VertexWeight; MAX_INFLUENCES]>;

/// A resolved anchor binding, with the mesh vertex it came from.
#[derive(Debug, Clone)]
pub struct AnchorBinding {
    /// The mesh vertex whose weights were taken.
    pub source_vertex: usize,
    /// The bounded weight list.
    pub weights: BoneBinding,
}

/// Bones permitted to appear in the export, in armature order.
///
/// A bone qualifies when it is a deform bone, has a non-empty vertex
/// group on the skin mesh, and passes the export mode's name filter.
#[must_use]
pub fn permitted_bones(
    armature: &Armature,
    mesh: &SkinMesh,
    mode: BoneExportMode,
    export_bones: &HashSet<String>,
) -> Vec<String> {
    let groups = mesh.vertex_group_names();

    armature
        .bones
        .iter()
        .filter(|bone| bone.deform && groups.contains(bone.name.as_str()))
        .filter(|bone| match mode {
            BoneExportMode::AllWithWeight => true,
            BoneExportMode::Whitelist => export_bones.contains(&bone.name),
            BoneExportMode::Blacklist => !export_bones.contains(&bone.name),
        })
        .map(|bone| bone.name.clone())
        .collect()
}

/// Resolve the bounded weight list for one mesh vertex.
///
/// Gathers (bone, weight) pairs over `permitted` (in armature order, so
/// equal weights tie-break deterministically), sorts descending by
/// weight, truncates to `influences` entries and pads the remainder with
/// empty-name zero weights. With `renormalize`, the kept weights are
/// rescaled to sum to 1 before padding.
///
/// # Errors
///
/// Returns [`SkinBindingError::NoQualifyingBones`] when no permitted bone
/// has positive weight on the vertex.
pub fn resolve_vertex(
    mesh: &SkinMesh,
    vertex: usize,
    permitted: &[String],
    influences: usize,
    renormalize: bool,
) -> Result<BoneBinding, SkinBindingError> {
    let mut binding: BoneBinding = permitted
        .iter()
        .filter_map(|bone| {
            mesh.bone_weight(vertex, bone)
                .map(|weight| VertexWeight::new(bone.clone(), weight))
        })
        .collect();

    if binding.is_empty() {
        return Err(SkinBindingError::NoQualifyingBones { vertex });
    }

    binding.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    binding.truncate(influences);

    if renormalize {
        let total: f64 = binding.iter().map(|vw| vw.weight).sum();
        for vw in &mut binding {
            vw.weight /= total;
        }
    }

    while binding.len() < influences {
        binding.push(VertexWeight::new(String::new(), 0.0));
    }

    Ok(binding)
}

/// Resolve the bounded weight list for a strand anchor.
///
/// The anchor inherits the weights of the nearest of its triangle's
/// three corners (ties resolve to the first corner), so the search is
/// bounded to 3 candidates rather than the whole mesh. Anchor weights
/// are not renormalized; the asset carries them as authored.
///
/// # Errors
///
/// Returns [`SkinBindingError::AnchorTriangleOutOfRange`] when the
/// anchor's triangle index is stale, or
/// [`SkinBindingError::NoQualifyingBones`] when the chosen vertex has no
/// qualifying weight.
pub fn resolve_anchor(
    mesh: &SkinMesh,
    triangles: &[[u32; 3]],
    anchor: &Anchor,
    permitted: &[String],
    influences: usize,
) -> Result<AnchorBinding, SkinBindingError> {
    let Some(corners) = triangles.get(anchor.triangle) else {
        return Err(SkinBindingError::AnchorTriangleOutOfRange {
            triangle: anchor.triangle,
            triangle_count: triangles.len(),
        });
    };

    let mut source_vertex = corners[0] as usize;
    let mut best_dist_sq = f64::INFINITY;
    for &corner in corners {
        let corner = corner as usize;
        let dist_sq = (mesh.positions[corner] - anchor.position).norm_squared();
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            source_vertex = corner;
        }
    }

    let weights = resolve_vertex(mesh, source_vertex, permitted, influences, false)?;
    Ok(AnchorBinding {
        source_vertex,
        weights,
    })
}
