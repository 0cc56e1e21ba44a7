//! Strand root anchors on the skin surface.

use nalgebra::Point3;

/// A strand root bound to a point on the skin surface.
///
/// Produced by the root anchor resolver. `position` and the barycentric
/// coordinates are in mesh-local space; the UV comes from the active UV
/// channel at the anchor point.
#[derive(Debug, Clone)]
pub struct Anchor {
    /// Index of the enclosing triangle on the skin mesh.
    pub triangle: usize,

    /// Barycentric coordinates of `position` within the triangle.
    /// Each component is >= 0 and they sum to 1.
    pub barycentric: [f64; 3],

    /// Anchor position on the surface, in mesh-local space.
    pub position: Point3<f64>,

    /// Interpolated surface UV at the anchor.
    pub uv: [f64; 2],

    /// Whether the anchor came from a ray hit rather than the
    /// closest-point fallback. Only used for debug provenance.
    pub from_intersection: bool,
}
