//! Pipeline orchestration: from scene snapshot to on-disk assets.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use tracing::info;

use hair_io::{write_tfx, write_tfxjson, write_tfxmesh};
use hair_resample::resample_strand;
use hair_skin::{permitted_bones, resolve_anchor, resolve_vertex};
use hair_types::{
    Anchor, Armature, CollisionAsset, CollisionVertex, ConfigError, ExportOptions,
    GeometryProvider, HairAsset, HairSkinBlock, HairVertex, MeshError, SkinMesh, SkinningEntry,
    Strand, StrandUv, COLLISION_MAX_INFLUENCES, MAX_INFLUENCES, SIM_THREAD_GROUP_SIZE,
};

use crate::{filter_strands, resolve_root_anchor, ExportError, ExportResult};

/// What a successful hair export produced.
#[derive(Debug)]
pub struct HairExportSummary {
    /// Strands in the written asset.
    pub strand_count: usize,
    /// Path of the binary artifact.
    pub tfx_path: PathBuf,
    /// Path of the JSON artifact.
    pub tfxjson_path: PathBuf,
}

/// Export the scene's hair to `<output_dir>/<name>.tfx` and
/// `<output_dir>/<name>.tfxjson`.
///
/// Runs the full pipeline: validation, resampling, filtering, root
/// anchoring, skin binding, serialization. All-or-nothing; on error no
/// output file is left at either target path.
///
/// # Errors
///
/// Returns an [`ExportError`] in the category of the first failing
/// stage.
pub fn export_hair<P: GeometryProvider>(
    provider: &P,
    options: &ExportOptions,
    output_dir: &Path,
    name: &str,
) -> ExportResult<HairExportSummary> {
    options.validate()?;
    ensure_output_dir(output_dir)?;

    let mesh = provider.skin_mesh().ok_or(ConfigError::MissingBaseMesh)?;
    if !mesh.has_uvs() {
        return Err(ConfigError::MissingUvChannel.into());
    }
    let armature = provider.armature().ok_or(ConfigError::MissingArmature)?;
    let local_from_world = mesh
        .local_from_world()
        .ok_or(ConfigError::SingularMeshTransform)?;
    let triangles = validated_triangles(mesh)?;

    let raw = provider.raw_strands();
    ensure_enough_strands(raw.len())?;
    info!(strands = raw.len(), "starting hair export");

    let resampled = raw
        .iter()
        .map(|strand| resample_strand(strand, options.vertices_per_strand))
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = filter_strands(
        resampled,
        &mesh.positions,
        &triangles,
        &local_from_world,
        options,
    );
    ensure_enough_strands(outcome.strands.len())?;

    let anchors = outcome
        .strands
        .iter()
        .enumerate()
        .map(|(index, strand)| {
            resolve_root_anchor(strand, index, mesh, &triangles, &local_from_world)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let skin = resolve_skin_block(mesh, &triangles, &anchors, armature, options)?;
    let asset = assemble_hair_asset(&outcome.strands, &anchors, skin, options, outcome.discarded_inside);

    let tfx_path = output_dir.join(format!("{name}.tfx"));
    let tfxjson_path = output_dir.join(format!("{name}.tfxjson"));
    write_tfx(&tfx_path, &asset)?;
    write_tfxjson(&tfxjson_path, &asset)?;

    info!(
        strands = asset.num_hair_strands,
        bones = asset.skin.bones_list.len(),
        "hair export finished"
    );
    Ok(HairExportSummary {
        strand_count: asset.num_hair_strands,
        tfx_path,
        tfxjson_path,
    })
}

/// Export the scene's collision proxy to `<output_dir>/<name>.tfxmesh`.
///
/// # Errors
///
/// Returns an [`ExportError`] in the category of the first failing
/// stage; a non-triangulated collision mesh or one whose normals are
/// not parallel to its vertices is a geometry error.
pub fn export_collision<P: GeometryProvider>(
    provider: &P,
    options: &ExportOptions,
    output_dir: &Path,
    name: &str,
) -> ExportResult<PathBuf> {
    options.validate()?;
    ensure_output_dir(output_dir)?;

    let mesh = provider
        .collision_mesh()
        .ok_or(ConfigError::MissingCollisionMesh)?;
    let armature = provider.armature().ok_or(ConfigError::MissingArmature)?;
    let triangles = validated_triangles(mesh)?;
    if mesh.normals.len() != mesh.positions.len() {
        return Err(MeshError::NormalCountMismatch {
            got: mesh.normals.len(),
            expected: mesh.positions.len(),
        }
        .into());
    }

    let permitted = permitted_bones(armature, mesh, options.bone_export_mode, &options.export_bones);

    let mut bones: Vec<String> = Vec::new();
    let mut vertices = Vec::with_capacity(mesh.vertex_count());
    for vertex in 0..mesh.vertex_count() {
        let binding = resolve_vertex(mesh, vertex, &permitted, COLLISION_MAX_INFLUENCES, true)?;

        let mut joints = [0u32; COLLISION_MAX_INFLUENCES];
        let mut weights = [0f64; COLLISION_MAX_INFLUENCES];
        for (slot, vw) in binding.iter().enumerate() {
            if vw.weight > 0.0 {
                joints[slot] = bone_index(&mut bones, &vw.bone);
                weights[slot] = vw.weight;
            }
        }

        vertices.push(CollisionVertex {
            position: mesh.positions[vertex],
            normal: mesh.normals[vertex],
            joints,
            weights,
        });
    }

    let asset = CollisionAsset {
        bones,
        vertices,
        triangles,
    };
    let path = output_dir.join(format!("{name}.tfxmesh"));
    write_tfxmesh(&path, &asset)?;

    info!(
        vertices = asset.vertices.len(),
        bones = asset.bones.len(),
        "collision export finished"
    );
    Ok(path)
}

fn ensure_output_dir(output_dir: &Path) -> ExportResult<()> {
    if output_dir.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::MissingOutputDirectory {
            path: output_dir.to_path_buf(),
        }
        .into())
    }
}

fn ensure_enough_strands(count: usize) -> ExportResult<()> {
    if count < SIM_THREAD_GROUP_SIZE {
        return Err(ExportError::InsufficientData {
            got: count,
            required: SIM_THREAD_GROUP_SIZE,
        });
    }
    Ok(())
}

fn validated_triangles(mesh: &SkinMesh) -> ExportResult<Vec<[u32; 3]>> {
    let triangles = mesh.triangles()?;
    if triangles.is_empty() {
        return Err(MeshError::Empty.into());
    }
    Ok(triangles)
}

/// Index of `bone` in the first-use ordered list, appending if new.
#[allow(clippy::cast_possible_truncation)]
fn bone_index(bones: &mut Vec<String>, bone: &str) -> u32 {
    match bones.iter().position(|b| b == bone) {
        Some(index) => index as u32,
        None => {
            bones.push(bone.to_string());
            (bones.len() - 1) as u32
        }
    }
}

/// Resolve the per-anchor skin bindings and the referenced-bone list.
#[allow(clippy::cast_possible_truncation)]
fn resolve_skin_block(
    mesh: &SkinMesh,
    triangles: &[[u32; 3]],
    anchors: &[Anchor],
    armature: &Armature,
    options: &ExportOptions,
) -> ExportResult<HairSkinBlock> {
    let permitted = permitted_bones(armature, mesh, options.bone_export_mode, &options.export_bones);

    let mut skinning_data = Vec::with_capacity(anchors.len() * MAX_INFLUENCES);
    let mut bones_list: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut intersects = 0usize;

    for (root_index, anchor) in anchors.iter().enumerate() {
        if anchor.from_intersection {
            intersects += 1;
        }
        let binding = resolve_anchor(mesh, triangles, anchor, &permitted, MAX_INFLUENCES)?;

        for vw in &binding.weights {
            if vw.weight > 0.0 && !seen.contains(&vw.bone) {
                seen.insert(vw.bone.clone());
                bones_list.push(vw.bone.clone());
            }
            skinning_data.push(SkinningEntry {
                weight: vw.weight,
                bone_name: vw.bone.clone(),
                source_vert_index: options
                    .debug_mode
                    .then(|| binding.source_vertex as u32),
                root_index: options.debug_mode.then(|| root_index as u32),
            });
        }
    }

    Ok(HairSkinBlock {
        skinning_data,
        num_guide_strands: anchors.len(),
        bones_list,
        total_intersects: options.debug_mode.then_some(intersects),
    })
}

/// Assemble the final hair asset from strands, anchors and skin data.
#[allow(clippy::cast_possible_truncation)]
fn assemble_hair_asset(
    strands: &[Strand],
    anchors: &[Anchor],
    skin: HairSkinBlock,
    options: &ExportOptions,
    discarded_inside: usize,
) -> HairAsset {
    let positions = strands
        .iter()
        .map(|strand| {
            let world = strand.world_points();
            let count = world.len();
            world
                .iter()
                .enumerate()
                .map(|(index, p)| {
                    let z = if options.invert_z_axis { -p.z } else { p.z };
                    HairVertex {
                        x: p.x as f32,
                        y: p.y as f32,
                        z: z as f32,
                        w: inverse_mass(index, count, options.both_ends_immovable),
                    }
                })
                .collect()
        })
        .collect();

    let uvs = anchors
        .iter()
        .map(|anchor| {
            let v = if options.invert_uv_y_axis {
                1.0 - anchor.uv[1]
            } else {
                anchor.uv[1]
            };
            StrandUv {
                x: anchor.uv[0] as f32,
                y: v as f32,
            }
        })
        .collect();

    HairAsset {
        positions,
        uvs,
        num_hair_strands: strands.len(),
        num_vertices_per_strand: options.vertices_per_strand,
        total_num_inside: options.debug_mode.then_some(discarded_inside),
        skin,
    }
}

/// Inverse mass of a strand vertex: 0 pins it, 1 frees it.
///
/// The first two vertices of every strand are always pinned; with
/// `both_ends_immovable` the last two are pinned as well.
fn inverse_mass(index: usize, count: usize, both_ends_immovable: bool) -> f32 {
    let pinned = index < 2 || (both_ends_immovable && index + 2 >= count);
    if pinned {
        0.0
    } else {
        1.0
    }
}
