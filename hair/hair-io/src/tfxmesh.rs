//! ASCII `.tfxmesh` collision proxy format.
//!
//! Line-oriented text: a bone table, then skinned vertices, then
//! triangles. Comment lines start with `#` and every data line leads
//! with its own index; both are part of the format as existing loaders
//! parse them positionally.

use std::path::Path;

use hair_types::CollisionAsset;
use tracing::info;

use crate::{write_atomic, WriteResult};

/// Encode a collision asset into the complete `.tfxmesh` text.
#[must_use]
pub fn encode_tfxmesh(asset: &CollisionAsset) -> String {
    let mut out = String::new();
    out.push_str("# TressFX collision mesh\n");

    out.push_str(&format!("numOfBones {}\n", asset.bones.len()));
    out.push_str("# bone index, bone name\n");
    for (index, bone) in asset.bones.iter().enumerate() {
        out.push_str(&format!("{index} {bone}\n"));
    }

    out.push_str(&format!("numOfVertices {}\n", asset.vertices.len()));
    out.push_str(
        "# vertex index, vertex position x, y, z, normal x, y, z, \
         joint index 0, joint index 1, joint index 2, joint index 3, \
         weight 0, weight 1, weight 2, weight 3\n",
    );
    for (index, vertex) in asset.vertices.iter().enumerate() {
        let p = vertex.position;
        let n = vertex.normal;
        let j = vertex.joints;
        let w = vertex.weights;
        out.push_str(&format!(
            "{index} {} {} {} {} {} {} {} {} {} {} {} {} {} {}\n",
            p.x, p.y, p.z, n.x, n.y, n.z, j[0], j[1], j[2], j[3], w[0], w[1], w[2], w[3]
        ));
    }

    out.push_str(&format!("numOfTriangles {}\n", asset.triangles.len()));
    out.push_str("# triangle index, vertex index 0, vertex index 1, vertex index 2\n");
    for (index, tri) in asset.triangles.iter().enumerate() {
        out.push_str(&format!("{index} {} {} {}\n", tri[0], tri[1], tri[2]));
    }

    out
}

/// Write a collision asset to `path` in the `.tfxmesh` format.
///
/// # Errors
///
/// Returns [`WriteError::Io`](crate::WriteError::Io) when the file
/// cannot be written.
pub fn write_tfxmesh(path: &Path, asset: &CollisionAsset) -> WriteResult<()> {
    let text = encode_tfxmesh(asset);
    write_atomic(path, text.as_bytes())?;
    info!(
        path = %path.display(),
        bones = asset.bones.len(),
        vertices = asset.vertices.len(),
        triangles = asset.triangles.len(),
        "wrote collision asset"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hair_types::CollisionVertex;
    use nalgebra::{Point3, Vector3};

    fn test_asset() -> CollisionAsset {
        CollisionAsset {
            bones: vec!["head".to_string(), "neck".to_string()],
            vertices: vec![
                CollisionVertex {
                    position: Point3::new(0.0, 0.0, 0.0),
                    normal: Vector3::z(),
                    joints: [0, 1, 0, 0],
                    weights: [0.5, 0.5, 0.0, 0.0],
                },
                CollisionVertex {
                    position: Point3::new(1.0, 0.0, 0.0),
                    normal: Vector3::z(),
                    joints: [1, 0, 0, 0],
                    weights: [1.0, 0.0, 0.0, 0.0],
                },
                CollisionVertex {
                    position: Point3::new(0.0, 1.0, 0.0),
                    normal: Vector3::z(),
                    joints: [0, 0, 0, 0],
                    weights: [1.0, 0.0, 0.0, 0.0],
                },
            ],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn sections_carry_counts_and_indices() {
        let text = encode_tfxmesh(&test_asset());
        assert!(text.contains("numOfBones 2\n"));
        assert!(text.contains("0 head\n"));
        assert!(text.contains("1 neck\n"));
        assert!(text.contains("numOfVertices 3\n"));
        assert!(text.contains("numOfTriangles 1\n"));
        assert!(text.contains("0 0 1 2\n"));
    }

    #[test]
    fn vertex_lines_have_fifteen_columns() {
        let text = encode_tfxmesh(&test_asset());
        let vertex_line = text
            .lines()
            .skip_while(|line| !line.starts_with("numOfVertices"))
            .find(|line| !line.starts_with('#') && !line.starts_with("numOf"))
            .expect("vertex line");
        assert_eq!(vertex_line.split_whitespace().count(), 15);
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("collision.tfxmesh");
        let asset = test_asset();

        write_tfxmesh(&path, &asset).expect("write");
        let text = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text, encode_tfxmesh(&asset));
    }
}
