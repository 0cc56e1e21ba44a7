//! Barycentric coordinates for root UV interpolation.

use nalgebra::Point3;

/// Compute barycentric coordinates of a point with respect to a triangle.
///
/// Always returns a valid weight triple: each component is non-negative
/// and the three sum to 1. Points outside the triangle (or off its plane)
/// get the coordinates of their in-plane projection, clamped back into
/// the triangle. A degenerate (zero-area) triangle yields `[1, 0, 0]`.
#[must_use]
pub fn barycentric_coordinates(
    point: Point3<f64>,
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
) -> [f64; 3] {
    let e0 = v1 - v0;
    let e1 = v2 - v0;
    let ep = point - v0;

    let d00 = e0.dot(&e0);
    let d01 = e0.dot(&e1);
    let d11 = e1.dot(&e1);
    let d20 = ep.dot(&e0);
    let d21 = ep.dot(&e1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < f64::EPSILON {
        // Degenerate triangle
        return [1.0, 0.0, 0.0];
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    // Clamp tiny negatives from points just outside an edge, then
    // renormalize so the weights still sum to 1.
    let clamped = [u.max(0.0), v.max(0.0), w.max(0.0)];
    let total = clamped[0] + clamped[1] + clamped[2];
    if total < f64::EPSILON {
        return [1.0, 0.0, 0.0];
    }
    [
        clamped[0] / total,
        clamped[1] / total,
        clamped[2] / total,
    ]
}

/// Interpolate a per-corner UV across a triangle by barycentric weights.
#[must_use]
pub fn barycentric_interpolate_uv(weights: [f64; 3], corner_uvs: &[[f64; 2]; 3]) -> [f64; 2] {
    [
        weights[0] * corner_uvs[0][0] + weights[1] * corner_uvs[1][0] + weights[2] * corner_uvs[2][0],
        weights[0] * corner_uvs[0][1] + weights[1] * corner_uvs[1][1] + weights[2] * corner_uvs[2][1],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn vertex_weights_are_unit() {
        let (v0, v1, v2) = unit_triangle();
        let w = barycentric_coordinates(v0, v0, v1, v2);
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-12);

        let w = barycentric_coordinates(v1, v0, v1, v2);
        assert_relative_eq!(w[1], 1.0, epsilon = 1e-12);

        let w = barycentric_coordinates(v2, v0, v1, v2);
        assert_relative_eq!(w[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_weights_are_thirds() {
        let (v0, v1, v2) = unit_triangle();
        let centroid = Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0);

        let w = barycentric_coordinates(centroid, v0, v1, v2);
        for weight in w {
            assert_relative_eq!(weight, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn outside_point_is_clamped_and_normalized() {
        let (v0, v1, v2) = unit_triangle();
        let outside = Point3::new(2.0, -1.0, 0.0);

        let w = barycentric_coordinates(outside, v0, v1, v2);
        assert!(w.iter().all(|&c| c >= 0.0));
        assert_relative_eq!(w[0] + w[1] + w[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_triangle_falls_back_to_first_vertex() {
        let v = Point3::new(1.0, 2.0, 3.0);
        let w = barycentric_coordinates(Point3::origin(), v, v, v);
        assert_eq!(w, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn uv_interpolation_matches_weights() {
        let uvs = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let uv = barycentric_interpolate_uv([0.5, 0.25, 0.25], &uvs);
        assert_relative_eq!(uv[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(uv[1], 0.25, epsilon = 1e-12);
    }
}
