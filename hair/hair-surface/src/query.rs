//! Ray casts, closest points and inside tests against a triangle soup.

use nalgebra::{Point3, Vector3};

/// Tolerance for parallel rays and near-zero determinants.
const EPSILON: f64 = 1e-10;

/// Result of a ray cast against a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter at the intersection.
    pub t: f64,
    /// Intersection point.
    pub position: Point3<f64>,
    /// Index of the hit triangle.
    pub triangle: usize,
}

/// Result of a closest-point query against a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Closest point on the surface.
    pub position: Point3<f64>,
    /// Index of the triangle containing it.
    pub triangle: usize,
    /// Unnormalized face normal of that triangle (CCW winding).
    pub normal: Vector3<f64>,
}

fn triangle_vertices(
    positions: &[Point3<f64>],
    tri: [u32; 3],
) -> (Point3<f64>, Point3<f64>, Point3<f64>) {
    (
        positions[tri[0] as usize],
        positions[tri[1] as usize],
        positions[tri[2] as usize],
    )
}

/// Unnormalized face normal of a triangle (CCW winding).
fn face_normal(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Vector3<f64> {
    (v1 - v0).cross(&(v2 - v0))
}

/// Compute the closest point on a triangle to a query point.
///
/// This implements the algorithm from "Real-Time Collision Detection" by
/// Christer Ericson.
#[must_use]
pub fn closest_point_on_triangle(
    point: Point3<f64>,
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
) -> Point3<f64> {
    let ab = v1 - v0;
    let ac = v2 - v0;
    let ap = point - v0;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);

    // Check if P is in vertex region outside A
    if d1 <= 0.0 && d2 <= 0.0 {
        return v0;
    }

    let bp = point - v1;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);

    // Check if P is in vertex region outside B
    if d3 >= 0.0 && d4 <= d3 {
        return v1;
    }

    // Check if P is in edge region of AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return v0 + ab * v;
    }

    let cp = point - v2;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);

    // Check if P is in vertex region outside C
    if d6 >= 0.0 && d5 <= d6 {
        return v2;
    }

    // Check if P is in edge region of AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return v0 + ac * w;
    }

    // Check if P is in edge region of BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return v1 + (v2 - v1) * w;
    }

    // P is inside the face region
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;

    v0 + ab * v + ac * w
}

/// Test if a ray intersects a triangle.
///
/// Uses the Möller–Trumbore algorithm.
///
/// # Returns
///
/// `Some(t)` where `t` is the ray parameter at intersection, or `None` if
/// no intersection.
#[must_use]
pub fn ray_triangle_intersect(
    ray_origin: Point3<f64>,
    ray_dir: Vector3<f64>,
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(&edge2);
    let a = edge1.dot(&h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(&h);

    // Check barycentric coordinate u
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray_dir.dot(&q);

    // Check barycentric coordinate v
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    // Compute t (distance along ray)
    let t = f * edge2.dot(&q);

    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Cast a ray against every triangle and return the first hit in face
/// iteration order.
///
/// Face iteration order (not nearest-hit order) is intentional: anchor
/// selection has to stay stable across re-exports of existing assets,
/// which were built with this rule.
#[must_use]
pub fn first_ray_hit(
    ray_origin: Point3<f64>,
    ray_dir: Vector3<f64>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
) -> Option<RayHit> {
    for (index, tri) in triangles.iter().enumerate() {
        let (v0, v1, v2) = triangle_vertices(positions, *tri);
        if let Some(t) = ray_triangle_intersect(ray_origin, ray_dir, v0, v1, v2) {
            return Some(RayHit {
                t,
                position: ray_origin + ray_dir * t,
                triangle: index,
            });
        }
    }
    None
}

/// Find the closest point on any triangle of the mesh.
///
/// Returns `None` for an empty mesh. Ties resolve to the lowest triangle
/// index, so results are deterministic across runs.
#[must_use]
pub fn closest_point_on_mesh(
    point: Point3<f64>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
) -> Option<SurfaceHit> {
    let mut best: Option<(f64, SurfaceHit)> = None;

    for (index, tri) in triangles.iter().enumerate() {
        let (v0, v1, v2) = triangle_vertices(positions, *tri);
        let closest = closest_point_on_triangle(point, v0, v1, v2);
        let dist_sq = (point - closest).norm_squared();

        let better = match best {
            Some((best_dist_sq, _)) => dist_sq < best_dist_sq,
            None => true,
        };
        if better {
            best = Some((
                dist_sq,
                SurfaceHit {
                    position: closest,
                    triangle: index,
                    normal: face_normal(v0, v1, v2),
                },
            ));
        }
    }

    best.map(|(_, hit)| hit)
}

/// Check if a point is inside a mesh by ray parity.
///
/// Casts a ray in the +X direction and counts intersections; an odd count
/// means inside. Unreliable near open boundaries or exactly on the
/// surface, which is why callers combine it with
/// [`point_inside_by_normal`].
#[must_use]
pub fn point_inside_by_parity(
    point: Point3<f64>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
) -> bool {
    let ray_dir = Vector3::new(1.0, 0.0, 0.0);
    let mut count = 0;

    for tri in triangles {
        let (v0, v1, v2) = triangle_vertices(positions, *tri);
        if ray_triangle_intersect(point, ray_dir, v0, v1, v2).is_some() {
            count += 1;
        }
    }

    // Odd count means inside
    count % 2 == 1
}

/// Check if a point is inside a mesh by the sign of the nearest face
/// normal.
///
/// Inside when the vector from the point to its closest surface point
/// agrees with the outward face normal (the surface faces away). Points
/// exactly on the surface count as inside. Returns `false` for an empty
/// mesh.
#[must_use]
pub fn point_inside_by_normal(
    point: Point3<f64>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
) -> bool {
    match closest_point_on_mesh(point, positions, triangles) {
        Some(hit) => (hit.position - point).dot(&hit.normal) >= 0.0,
        None => false,
    }
}

/// Check if a point is inside a mesh.
///
/// Either heuristic claiming inside is enough; parity misfires near
/// coplanar geometry and the normal test misfires in concave pockets, and
/// the union of the two matches what strand filtering needs.
#[must_use]
pub fn point_inside_mesh(
    point: Point3<f64>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
) -> bool {
    point_inside_by_parity(point, positions, triangles)
        || point_inside_by_normal(point, positions, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simple_triangle() -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 10.0, 0.0),
        )
    }

    fn tetrahedron() -> (Vec<Point3<f64>>, Vec<[u32; 3]>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 0.866, 0.0),
            Point3::new(0.5, 0.289, 0.816),
        ];
        let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        (positions, triangles)
    }

    #[test]
    fn closest_point_inside_triangle() {
        let (v0, v1, v2) = simple_triangle();
        let point = Point3::new(5.0, 3.0, 5.0);

        let closest = closest_point_on_triangle(point, v0, v1, v2);

        // Closest should be on the triangle plane (z=0)
        assert_relative_eq!(closest.z, 0.0, epsilon = 1e-10);
        assert_relative_eq!(closest.x, 5.0, epsilon = 1e-10);
        assert_relative_eq!(closest.y, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn closest_point_vertex_region() {
        let (v0, v1, v2) = simple_triangle();

        // Point near vertex 0
        let point = Point3::new(-5.0, -5.0, 0.0);
        let closest = closest_point_on_triangle(point, v0, v1, v2);

        assert_relative_eq!(closest.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(closest.y, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn closest_point_edge_region() {
        let (v0, v1, v2) = simple_triangle();

        // Point near edge v0-v1
        let point = Point3::new(5.0, -5.0, 0.0);
        let closest = closest_point_on_triangle(point, v0, v1, v2);

        // Should be on the edge (y = 0)
        assert_relative_eq!(closest.y, 0.0, epsilon = 1e-10);
        assert!(closest.x >= 0.0 && closest.x <= 10.0);
    }

    #[test]
    fn ray_hits_triangle() {
        let (v0, v1, v2) = simple_triangle();
        let ray_origin = Point3::new(5.0, 3.0, 5.0);
        let ray_dir = Vector3::new(0.0, 0.0, -1.0);

        let hit = ray_triangle_intersect(ray_origin, ray_dir, v0, v1, v2);

        assert!(hit.is_some());
        assert_relative_eq!(hit.expect("should hit"), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn ray_misses_triangle() {
        let (v0, v1, v2) = simple_triangle();
        let ray_origin = Point3::new(100.0, 100.0, 5.0);
        let ray_dir = Vector3::new(0.0, 0.0, -1.0);

        assert!(ray_triangle_intersect(ray_origin, ray_dir, v0, v1, v2).is_none());
    }

    #[test]
    fn ray_parallel_to_triangle() {
        let (v0, v1, v2) = simple_triangle();
        let ray_origin = Point3::new(5.0, 3.0, 5.0);
        let ray_dir = Vector3::new(1.0, 0.0, 0.0); // Parallel to XY plane

        assert!(ray_triangle_intersect(ray_origin, ray_dir, v0, v1, v2).is_none());
    }

    #[test]
    fn first_hit_reports_triangle_index() {
        let (positions, triangles) = tetrahedron();
        let origin = Point3::new(0.5, 0.3, 10.0);
        let dir = Vector3::new(0.0, 0.0, -1.0);

        let hit = first_ray_hit(origin, dir, &positions, &triangles).expect("should hit");
        assert!(hit.triangle < triangles.len());
        assert!(hit.t > 0.0);
        assert_relative_eq!(hit.position.x, 0.5, epsilon = 1e-10);
        assert_relative_eq!(hit.position.y, 0.3, epsilon = 1e-10);
    }

    #[test]
    fn ray_miss_on_mesh_is_none() {
        let (positions, triangles) = tetrahedron();
        let origin = Point3::new(50.0, 50.0, 10.0);
        let dir = Vector3::new(0.0, 0.0, -1.0);

        assert!(first_ray_hit(origin, dir, &positions, &triangles).is_none());
    }

    #[test]
    fn closest_point_on_mesh_snaps_to_surface() {
        let (positions, triangles) = tetrahedron();
        // Below the base plane (z=0): closest face is the base.
        let point = Point3::new(0.5, 0.3, -1.0);

        let hit = closest_point_on_mesh(point, &positions, &triangles).expect("non-empty mesh");
        assert_relative_eq!(hit.position.z, 0.0, epsilon = 1e-10);
        assert_relative_eq!(hit.position.x, 0.5, epsilon = 1e-10);
        assert_relative_eq!(hit.position.y, 0.3, epsilon = 1e-10);
    }

    #[test]
    fn closest_point_on_empty_mesh_is_none() {
        let point = Point3::origin();
        assert!(closest_point_on_mesh(point, &[], &[]).is_none());
    }

    #[test]
    fn centroid_is_inside_tetrahedron() {
        let (positions, triangles) = tetrahedron();
        let centroid = Point3::new(0.5, 0.385, 0.204);

        assert!(point_inside_by_parity(centroid, &positions, &triangles));
        assert!(point_inside_by_normal(centroid, &positions, &triangles));
        assert!(point_inside_mesh(centroid, &positions, &triangles));
    }

    #[test]
    fn far_point_is_outside_tetrahedron() {
        let (positions, triangles) = tetrahedron();
        let outside = Point3::new(10.0, 10.0, 10.0);

        assert!(!point_inside_by_parity(outside, &positions, &triangles));
        assert!(!point_inside_by_normal(outside, &positions, &triangles));
        assert!(!point_inside_mesh(outside, &positions, &triangles));
    }
}
