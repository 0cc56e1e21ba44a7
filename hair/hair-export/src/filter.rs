//! Strand filtering: minimum length, inside-mesh rejection, LOD shuffle.

use nalgebra::{Matrix4, Point3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use hair_surface::point_inside_mesh;
use hair_types::{ExportOptions, Strand};

/// Fixed seed for the LOD shuffle. Must never change between runs or
/// builds; re-exports of the same scene have to produce identical strand
/// order.
pub const LOD_SHUFFLE_SEED: u64 = 987_654_321;

/// What the filter kept and why it dropped the rest.
#[derive(Debug)]
pub struct FilterOutcome {
    /// Surviving strands, in final (possibly shuffled) order.
    pub strands: Vec<Strand>,
    /// Strands dropped by the minimum-length filter.
    pub discarded_short: usize,
    /// Strands dropped by the inside-mesh test.
    pub discarded_inside: usize,
}

/// Filter resampled strands against the skin mesh.
///
/// Applies, in order: the minimum arc-length filter (0 disables it),
/// inside-mesh rejection (a strand with more than half its vertices
/// inside the mesh is discarded), and the deterministic LOD shuffle
/// (skipped in debug mode so output order stays inspectable).
///
/// `positions`/`triangles` are the skin mesh in mesh-local space and
/// `local_from_world` its inverse world transform; strand vertices are
/// moved into mesh-local space for the inside test.
#[must_use]
pub fn filter_strands(
    strands: Vec<Strand>,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
    local_from_world: &Matrix4<f64>,
    options: &ExportOptions,
) -> FilterOutcome {
    let mut discarded_short = 0;
    let mut discarded_inside = 0;
    let mut kept = Vec::with_capacity(strands.len());

    for (index, strand) in strands.into_iter().enumerate() {
        if options.minimum_curve_length > 0.0 && strand.arc_length() < options.minimum_curve_length
        {
            debug!(strand = index, "discarded: below minimum length");
            discarded_short += 1;
            continue;
        }

        let inside = count_inside_vertices(&strand, positions, triangles, local_from_world);
        if inside > strand.len() / 2 {
            debug!(strand = index, inside, "discarded: inside skin mesh");
            discarded_inside += 1;
            continue;
        }

        kept.push(strand);
    }

    if options.randomize_for_lod && !options.debug_mode {
        let mut rng = StdRng::seed_from_u64(LOD_SHUFFLE_SEED);
        kept.shuffle(&mut rng);
    }

    info!(
        kept = kept.len(),
        discarded_short, discarded_inside, "strand filtering done"
    );

    FilterOutcome {
        strands: kept,
        discarded_short,
        discarded_inside,
    }
}

/// Count strand vertices that classify as inside the mesh.
fn count_inside_vertices(
    strand: &Strand,
    positions: &[Point3<f64>],
    triangles: &[[u32; 3]],
    local_from_world: &Matrix4<f64>,
) -> usize {
    let to_mesh_local = local_from_world * strand.world_from_local;
    strand
        .points
        .iter()
        .filter(|p| {
            let local = to_mesh_local.transform_point(p);
            point_inside_mesh(local, positions, triangles)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hair_types::Strand;
    use nalgebra::Vector3;

    fn strand_through(points: Vec<Point3<f64>>) -> Strand {
        let n = points.len();
        Strand {
            points,
            radii: vec![1.0; n],
            tilts: vec![0.0; n],
            world_from_local: Matrix4::identity(),
        }
    }

    /// Upright strand of `n` vertices starting at `root`, spaced 0.1
    /// apart along +z.
    fn upright_strand(root: Point3<f64>, n: usize) -> Strand {
        strand_through(
            (0..n)
                .map(|i| root + Vector3::new(0.0, 0.0, 0.1 * i as f64))
                .collect(),
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
    fn short_strands_are_dropped() {
        let (positions, triangles) = tetrahedron();
        let strands = vec![
            upright_strand(Point3::new(5.0, 5.0, 5.0), 4),
            strand_through(vec![
                Point3::new(5.0, 5.0, 5.0),
                Point3::new(5.0, 5.0, 5.0001),
                Point3::new(5.0, 5.0, 5.0002),
                Point3::new(5.0, 5.0, 5.0003),
            ]),
        ];
        let options = ExportOptions {
            minimum_curve_length: 0.01,
            randomize_for_lod: false,
            ..ExportOptions::default()
        };

        let outcome = filter_strands(strands, &positions, &triangles, &Matrix4::identity(), &options);
        assert_eq!(outcome.strands.len(), 1);
        assert_eq!(outcome.discarded_short, 1);
        assert_eq!(outcome.discarded_inside, 0);
    }

    #[test]
    fn zero_threshold_disables_length_filter() {
        let (positions, triangles) = tetrahedron();
        let strands = vec![strand_through(vec![
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(5.0, 5.0, 5.0001),
        ])];
        let options = ExportOptions {
            minimum_curve_length: 0.0,
            randomize_for_lod: false,
            ..ExportOptions::default()
        };

        let outcome = filter_strands(strands, &positions, &triangles, &Matrix4::identity(), &options);
        assert_eq!(outcome.strands.len(), 1);
    }

    #[test]
    fn buried_strands_are_dropped() {
        let (positions, triangles) = tetrahedron();
        // All four vertices near the centroid, well inside.
        let buried = strand_through(vec![
            Point3::new(0.5, 0.385, 0.2),
            Point3::new(0.5, 0.385, 0.22),
            Point3::new(0.5, 0.385, 0.24),
            Point3::new(0.5, 0.385, 0.26),
        ]);
        // Root inside, but most vertices clear the surface.
        let emerging = strand_through(vec![
            Point3::new(0.5, 0.385, 0.2),
            Point3::new(0.5, 0.385, 0.9),
            Point3::new(0.5, 0.385, 1.2),
            Point3::new(0.5, 0.385, 1.5),
        ]);
        let options = ExportOptions {
            minimum_curve_length: 0.0,
            randomize_for_lod: false,
            ..ExportOptions::default()
        };

        let outcome = filter_strands(
            vec![buried, emerging],
            &positions,
            &triangles,
            &Matrix4::identity(),
            &options,
        );
        assert_eq!(outcome.discarded_inside, 1);
        assert_eq!(outcome.strands.len(), 1);
        // The survivor is the emerging strand: most vertices outside.
        assert!(outcome.strands[0].points[3].z > 0.4);
    }

    #[test]
    fn shuffle_is_deterministic() {
        let (positions, triangles) = tetrahedron();
        let make = || {
            (0..10)
                .map(|i| upright_strand(Point3::new(5.0 + i as f64, 5.0, 5.0), 4))
                .collect::<Vec<_>>()
        };
        let options = ExportOptions {
            minimum_curve_length: 0.0,
            randomize_for_lod: true,
            ..ExportOptions::default()
        };

        let a = filter_strands(make(), &positions, &triangles, &Matrix4::identity(), &options);
        let b = filter_strands(make(), &positions, &triangles, &Matrix4::identity(), &options);
        let order = |outcome: &FilterOutcome| {
            outcome
                .strands
                .iter()
                .map(|s| s.points[0].x)
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn debug_mode_keeps_input_order() {
        let (positions, triangles) = tetrahedron();
        let strands: Vec<_> = (0..5)
            .map(|i| upright_strand(Point3::new(5.0 + i as f64, 5.0, 5.0), 4))
            .collect();
        let options = ExportOptions {
            minimum_curve_length: 0.0,
            randomize_for_lod: true,
            debug_mode: true,
            ..ExportOptions::default()
        };

        let outcome = filter_strands(strands, &positions, &triangles, &Matrix4::identity(), &options);
        let xs: Vec<_> = outcome.strands.iter().map(|s| s.points[0].x).collect();
        assert_eq!(xs, vec![5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
