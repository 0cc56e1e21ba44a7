//! Geometric queries against the skin surface.
//!
//! Everything the anchoring and filtering stages need to interrogate a
//! triangle mesh: ray-triangle intersection, closest points, the two
//! point-in-mesh heuristics, and barycentric coordinates.
//!
//! All functions are pure and operate on plain slices
//! (`&[Point3<f64>]` positions plus `&[[u32; 3]]` triangles), so they
//! carry no mesh-type dependency. Every query is a brute-force sweep
//! over all triangles; for an offline batch exporter the O(triangles)
//! cost is acceptable and keeps the results trivially deterministic.
//!
//! # Spaces
//!
//! Callers must pass the query point and the mesh in the *same* space
//! (conventionally mesh-local). Nothing here applies transforms.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod barycentric;
mod query;

pub use barycentric::{barycentric_coordinates, barycentric_interpolate_uv};
pub use query::{
    closest_point_on_mesh, closest_point_on_triangle, first_ray_hit, point_inside_by_normal,
    point_inside_by_parity, point_inside_mesh, ray_triangle_intersect, RayHit, SurfaceHit,
};
