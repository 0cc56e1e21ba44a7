//! Hair strand curves.

use nalgebra::{Matrix4, Point3};

/// A raw hair curve as handed over by the [`GeometryProvider`].
///
/// Points are ordered root to tip. Any point count >= 2 is accepted
/// here; the resampler normalizes strands to a fixed vertex count.
///
/// [`GeometryProvider`]: crate::GeometryProvider
#[derive(Debug, Clone)]
pub struct RawStrand {
    /// Control points in strand-local space, root first.
    pub points: Vec<Point3<f64>>,

    /// Optional per-point radius channel, parallel to `points`.
    pub radii: Option<Vec<f64>>,

    /// Optional per-point tilt channel, parallel to `points`.
    pub tilts: Option<Vec<f64>>,

    /// Strand-local to world transform.
    pub world_from_local: Matrix4<f64>,
}

impl RawStrand {
    /// Create a raw strand from points alone, with an identity transform
    /// and no scalar channels.
    #[must_use]
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self {
            points,
            radii: None,
            tilts: None,
            world_from_local: Matrix4::identity(),
        }
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the strand has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A resampled hair strand with a fixed vertex count.
///
/// Produced by the resampler; `points`, `radii` and `tilts` all have
/// exactly the configured vertices-per-strand length. Points remain in
/// strand-local space; the original transform is carried along so later
/// stages can move vertices into mesh-local or world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    /// Resampled vertices in strand-local space, root first.
    pub points: Vec<Point3<f64>>,

    /// Resampled radius channel, parallel to `points`.
    pub radii: Vec<f64>,

    /// Resampled tilt channel, parallel to `points`.
    pub tilts: Vec<f64>,

    /// Strand-local to world transform, inherited from the raw strand.
    pub world_from_local: Matrix4<f64>,
}

impl Strand {
    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the strand has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arc length: the sum of consecutive-point distances, measured in
    /// strand-local space.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum()
    }

    /// Vertices transformed into world space.
    #[must_use]
    pub fn world_points(&self) -> Vec<Point3<f64>> {
        self.points
            .iter()
            .map(|p| self.world_from_local.transform_point(p))
            .collect()
    }
}
