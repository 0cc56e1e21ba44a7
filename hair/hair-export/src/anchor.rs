//! Root anchoring: binding each strand root to the skin surface.

use nalgebra::{Matrix4, Point3, Vector3};
use tracing::debug;

use hair_surface::{
    barycentric_coordinates, barycentric_interpolate_uv, closest_point_on_mesh, first_ray_hit,
    point_inside_mesh,
};
use hair_types::{Anchor, MeshError, SkinMesh, Strand};

use crate::GeometryError;

/// Resolve the surface anchor for one strand.
///
/// Strand vertices are moved into mesh-local space first; all geometric
/// tests below operate in that one space. The anchor ray originates at
/// the root and points from the last inside vertex toward the first
/// outside vertex, reproducing where the strand pierces the scalp. When
/// the ray misses (grazing roots, open mesh boundaries), the anchor
/// falls back to the closest-point projection of the root.
///
/// The returned anchor carries the enclosing triangle, barycentric
/// coordinates, the mesh-local position, and the UV interpolated from
/// the triangle's corner UVs. No axis flips are applied here.
///
/// # Errors
///
/// Returns [`GeometryError::StrandInsideMesh`] when every vertex
/// classifies as inside (no ray direction can be derived), or a wrapped
/// [`MeshError::Empty`] for a mesh with no triangles.
pub fn resolve_root_anchor(
    strand: &Strand,
    strand_index: usize,
    mesh: &SkinMesh,
    triangles: &[[u32; 3]],
    local_from_world: &Matrix4<f64>,
) -> Result<Anchor, GeometryError> {
    let to_mesh_local = local_from_world * strand.world_from_local;
    let points: Vec<Point3<f64>> = strand
        .points
        .iter()
        .map(|p| to_mesh_local.transform_point(p))
        .collect();

    let first_outside = points
        .iter()
        .position(|p| !point_inside_mesh(*p, &mesh.positions, triangles))
        .ok_or(GeometryError::StrandInsideMesh {
            strand: strand_index,
        })?;

    // Root already outside: aim along the first segment instead.
    let direction = if first_outside == 0 {
        points[1] - points[0]
    } else {
        points[first_outside] - points[first_outside - 1]
    };

    let root = points[0];
    let surface = ray_or_fallback(root, direction, mesh, triangles)?;
    let (position, triangle, from_intersection) = surface;

    let corners = triangles[triangle];
    let v0 = mesh.positions[corners[0] as usize];
    let v1 = mesh.positions[corners[1] as usize];
    let v2 = mesh.positions[corners[2] as usize];
    let barycentric = barycentric_coordinates(position, v0, v1, v2);

    let face_uvs = &mesh.corner_uvs[triangle];
    let uv = barycentric_interpolate_uv(barycentric, &[face_uvs[0], face_uvs[1], face_uvs[2]]);

    debug!(
        strand = strand_index,
        triangle, from_intersection, "anchored strand root"
    );

    Ok(Anchor {
        triangle,
        barycentric,
        position,
        uv,
        from_intersection,
    })
}

/// Cast the anchor ray; fall back to closest-point projection on a miss.
fn ray_or_fallback(
    root: Point3<f64>,
    direction: Vector3<f64>,
    mesh: &SkinMesh,
    triangles: &[[u32; 3]],
) -> Result<(Point3<f64>, usize, bool), GeometryError> {
    if direction.norm_squared() > 0.0 {
        if let Some(hit) = first_ray_hit(root, direction.normalize(), &mesh.positions, triangles) {
            return Ok((hit.position, hit.triangle, true));
        }
    }

    let hit = closest_point_on_mesh(root, &mesh.positions, triangles)
        .ok_or(GeometryError::Mesh(MeshError::Empty))?;
    Ok((hit.position, hit.triangle, false))
}
