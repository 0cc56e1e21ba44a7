//! Curve resampling to a fixed vertex count.

use hair_types::{RawStrand, Strand};
use nalgebra::Point3;

use crate::ResampleError;

/// Consecutive points closer than this are treated as duplicates.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// Resample a raw strand to exactly `target` vertices.
///
/// The output strand keeps the raw strand's local-to-world transform;
/// points stay in strand-local space. Radius and tilt channels are
/// linearly interpolated from the raw samples; a missing radius channel
/// defaults to 1 and a missing tilt channel to 0.
///
/// # Errors
///
/// Returns [`ResampleError::TooFewPoints`] for strands with fewer than 2
/// points, [`ResampleError::Degenerate`] when all points coincide, and
/// [`ResampleError::ChannelLengthMismatch`] when a radius or tilt channel
/// is not parallel to the point list.
pub fn resample_strand(raw: &RawStrand, target: usize) -> Result<Strand, ResampleError> {
    if raw.points.len() < 2 {
        return Err(ResampleError::TooFewPoints {
            got: raw.points.len(),
        });
    }
    if let Some(radii) = &raw.radii {
        if radii.len() != raw.points.len() {
            return Err(ResampleError::ChannelLengthMismatch {
                channel: "radius",
                got: radii.len(),
                expected: raw.points.len(),
            });
        }
    }
    if let Some(tilts) = &raw.tilts {
        if tilts.len() != raw.points.len() {
            return Err(ResampleError::ChannelLengthMismatch {
                channel: "tilt",
                got: tilts.len(),
                expected: raw.points.len(),
            });
        }
    }

    let mut control = dedup_points(&raw.points);
    if control.len() < 2 {
        return Err(ResampleError::Degenerate);
    }
    let had_duplicates = control.len() != raw.points.len();

    while control.len() < target {
        control = insert_midpoints(&control);
    }

    // Duplicate control points flatten Catmull-Rom tangents in ways that
    // produce kinks; once any were removed, plain linear sampling of the
    // deduplicated polyline is the safer reconstruction.
    let points = if had_duplicates {
        sample_linear(&control, target)
    } else {
        sample_catmull_rom(&control, target)
    };

    let radii = match &raw.radii {
        Some(values) => interpolate_channel(values, target),
        None => vec![1.0; target],
    };
    let tilts = match &raw.tilts {
        Some(values) => interpolate_channel(values, target),
        None => vec![0.0; target],
    };

    Ok(Strand {
        points,
        radii,
        tilts,
        world_from_local: raw.world_from_local,
    })
}

/// Drop consecutive near-duplicate points.
fn dedup_points(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let mut out: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for point in points {
        let duplicate = out
            .last()
            .is_some_and(|prev| (point - prev).norm() < DUPLICATE_EPSILON);
        if !duplicate {
            out.push(*point);
        }
    }
    out
}

/// Double the resolution of a polyline by inserting segment midpoints.
fn insert_midpoints(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let mut out = Vec::with_capacity(points.len() * 2 - 1);
    for pair in points.windows(2) {
        out.push(pair[0]);
        out.push(Point3::from((pair[0].coords + pair[1].coords) * 0.5));
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

/// Map a global parameter `u` in [0, 1] to a segment index and local t.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn segment_parameter(u: f64, segment_count: usize) -> (usize, f64) {
    let x = u * segment_count as f64;
    let index = (x.floor() as usize).min(segment_count - 1);
    (index, x - index as f64)
}

/// Evaluate one Catmull-Rom segment at local parameter `t`.
fn catmull_rom(
    p0: Point3<f64>,
    p1: Point3<f64>,
    p2: Point3<f64>,
    p3: Point3<f64>,
    t: f64,
) -> Point3<f64> {
    let t2 = t * t;
    let t3 = t2 * t;
    let coords = (p1.coords * 2.0
        + (p2.coords - p0.coords) * t
        + (p0.coords * 2.0 - p1.coords * 5.0 + p2.coords * 4.0 - p3.coords) * t2
        + (p1.coords * 3.0 - p0.coords - p2.coords * 3.0 + p3.coords) * t3)
        * 0.5;
    Point3::from(coords)
}

/// Sample a clamped Catmull-Rom spline through `control` at `target`
/// uniformly spaced parameters.
///
/// Endpoints are clamped by repeating the first and last control points
/// as phantom neighbors, so the spline interpolates both ends exactly.
#[allow(clippy::cast_precision_loss)]
fn sample_catmull_rom(control: &[Point3<f64>], target: usize) -> Vec<Point3<f64>> {
    let segments = control.len() - 1;
    let last = control.len() - 1;

    (0..target)
        .map(|j| {
            let u = j as f64 / (target - 1) as f64;
            let (i, t) = segment_parameter(u, segments);
            let p0 = control[i.saturating_sub(1)];
            let p1 = control[i];
            let p2 = control[i + 1];
            let p3 = control[(i + 2).min(last)];
            catmull_rom(p0, p1, p2, p3, t)
        })
        .collect()
}

/// Sample a polyline at `target` uniformly spaced parameters.
#[allow(clippy::cast_precision_loss)]
fn sample_linear(control: &[Point3<f64>], target: usize) -> Vec<Point3<f64>> {
    let segments = control.len() - 1;

    (0..target)
        .map(|j| {
            let u = j as f64 / (target - 1) as f64;
            let (i, t) = segment_parameter(u, segments);
            Point3::from(control[i].coords * (1.0 - t) + control[i + 1].coords * t)
        })
        .collect()
}

/// Linearly interpolate a scalar channel to `target` samples.
#[allow(clippy::cast_precision_loss)]
fn interpolate_channel(values: &[f64], target: usize) -> Vec<f64> {
    if values.len() < 2 {
        let fill = values.first().copied().unwrap_or_default();
        return vec![fill; target];
    }
    let segments = values.len() - 1;

    (0..target)
        .map(|j| {
            let u = j as f64 / (target - 1) as f64;
            let (i, t) = segment_parameter(u, segments);
            values[i] * (1.0 - t) + values[i + 1] * t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;

    fn raw(points: Vec<Point3<f64>>) -> RawStrand {
        RawStrand::from_points(points)
    }

    #[test]
    fn straight_strand_stays_straight() {
        let input = raw(vec![Point3::origin(), Point3::new(10.0, 0.0, 0.0)]);
        let strand = resample_strand(&input, 8).expect("valid strand");

        assert_eq!(strand.len(), 8);
        for (j, point) in strand.points.iter().enumerate() {
            let expected = 10.0 * j as f64 / 7.0;
            assert_relative_eq!(point.x, expected, epsilon = 1e-9);
            assert_relative_eq!(point.y, 0.0, epsilon = 1e-9);
            assert_relative_eq!(point.z, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn endpoints_are_interpolated_exactly() {
        let input = raw(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 1.0, 1.0),
            Point3::new(4.0, 4.0, 2.0),
        ]);
        let strand = resample_strand(&input, 16).expect("valid strand");

        assert_eq!(strand.len(), 16);
        let first = strand.points[0];
        let last = strand.points[15];
        assert_relative_eq!(first.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(last.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(last.y, 4.0, epsilon = 1e-9);
        assert_relative_eq!(last.z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn three_point_strand_resamples_to_eight() {
        let input = raw(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        let strand = resample_strand(&input, 8).expect("valid strand");

        assert_eq!(strand.len(), 8);
        assert_eq!(strand.radii.len(), 8);
        assert_eq!(strand.tilts.len(), 8);
        // Monotone in x for this gentle arc.
        for pair in strand.points.windows(2) {
            assert!(pair[1].x >= pair[0].x - 1e-9);
        }
    }

    #[test]
    fn duplicate_points_fall_back_to_linear() {
        let input = raw(vec![
            Point3::origin(),
            Point3::origin(),
            Point3::new(4.0, 0.0, 0.0),
        ]);
        let strand = resample_strand(&input, 4).expect("valid strand");

        assert_eq!(strand.len(), 4);
        for (j, point) in strand.points.iter().enumerate() {
            assert_relative_eq!(point.x, 4.0 * j as f64 / 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn coincident_strand_is_degenerate() {
        let input = raw(vec![Point3::origin(), Point3::origin(), Point3::origin()]);
        assert_eq!(resample_strand(&input, 8), Err(ResampleError::Degenerate));
    }

    #[test]
    fn single_point_is_too_few() {
        let input = raw(vec![Point3::origin()]);
        assert_eq!(
            resample_strand(&input, 8),
            Err(ResampleError::TooFewPoints { got: 1 })
        );
    }

    #[test]
    fn channels_are_interpolated() {
        let mut input = raw(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        input.radii = Some(vec![1.0, 0.5, 0.0]);
        input.tilts = Some(vec![0.0, 0.0, 1.0]);

        let strand = resample_strand(&input, 4).expect("valid strand");
        assert_relative_eq!(strand.radii[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(strand.radii[3], 0.0, epsilon = 1e-12);
        // Midway through the first source segment.
        assert_relative_eq!(strand.radii[1], 1.0 - 2.0 / 3.0 * 0.5, epsilon = 1e-9);
        assert_relative_eq!(strand.tilts[3], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn channel_length_mismatch_is_rejected() {
        let mut input = raw(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        input.radii = Some(vec![1.0]);
        assert_eq!(
            resample_strand(&input, 8),
            Err(ResampleError::ChannelLengthMismatch {
                channel: "radius",
                got: 1,
                expected: 2,
            })
        );
    }

    #[test]
    fn missing_channels_get_defaults() {
        let input = raw(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        let strand = resample_strand(&input, 4).expect("valid strand");
        assert!(strand.radii.iter().all(|&r| (r - 1.0).abs() < 1e-12));
        assert!(strand.tilts.iter().all(|&t| t.abs() < 1e-12));
    }

    #[test]
    fn transform_is_carried_through() {
        let mut input = raw(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        input.world_from_local =
            Matrix4::new_translation(&nalgebra::Vector3::new(0.0, 0.0, 2.0));

        let strand = resample_strand(&input, 4).expect("valid strand");
        let world = strand.world_points();
        assert_relative_eq!(world[0].z, 2.0, epsilon = 1e-12);
    }
}
