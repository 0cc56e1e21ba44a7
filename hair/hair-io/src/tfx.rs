//! Binary `.tfx` hair format.
//!
//! Layout (all little-endian):
//!
//! | Offset | Size        | Field                                  |
//! |--------|-------------|----------------------------------------|
//! | 0      | 4           | version (`f32`)                        |
//! | 4      | 4           | number of strands (`u32`)              |
//! | 8      | 4           | vertices per strand (`u32`)            |
//! | 12     | 4           | offset of the position block (`u32`)   |
//! | 16     | 4           | offset of the strand-UV block (`u32`)  |
//! | 20     | 12          | three unused block offsets, 0          |
//! | 32     | 128         | reserved, 0                            |
//! | 160    | S x N x 16  | positions: x, y, z, inverse mass (`f32`) |
//! | ...    | S x 8       | strand UVs: u, v (`f32`)               |

use std::path::Path;

use hair_types::HairAsset;
use tracing::info;

use crate::{write_atomic, WriteResult};

/// Format version written into the header.
pub const TFX_VERSION: f32 = 4.0;

/// Size of the fixed binary header in bytes.
pub const TFX_HEADER_SIZE: usize = 160;

/// Reserved `u32` slots at the end of the header.
const RESERVED_SLOTS: usize = 32;

/// Encode a hair asset into the complete `.tfx` byte stream.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode_tfx(asset: &HairAsset) -> Vec<u8> {
    let strand_count = asset.num_hair_strands;
    let vertex_count = strand_count * asset.num_vertices_per_strand;

    let offset_position = TFX_HEADER_SIZE;
    let offset_strand_uv = offset_position + vertex_count * 16;
    let total = offset_strand_uv + strand_count * 8;

    let mut bytes = Vec::with_capacity(total);
    bytes.extend_from_slice(&TFX_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(strand_count as u32).to_le_bytes());
    bytes.extend_from_slice(&(asset.num_vertices_per_strand as u32).to_le_bytes());
    bytes.extend_from_slice(&(offset_position as u32).to_le_bytes());
    bytes.extend_from_slice(&(offset_strand_uv as u32).to_le_bytes());
    // Per-vertex UV, per-strand thickness and per-vertex color blocks are
    // not written; their offsets stay 0.
    for _ in 0..3 + RESERVED_SLOTS {
        bytes.extend_from_slice(&0u32.to_le_bytes());
    }

    for strand in &asset.positions {
        for vertex in strand {
            bytes.extend_from_slice(&vertex.x.to_le_bytes());
            bytes.extend_from_slice(&vertex.y.to_le_bytes());
            bytes.extend_from_slice(&vertex.z.to_le_bytes());
            bytes.extend_from_slice(&vertex.w.to_le_bytes());
        }
    }

    for uv in &asset.uvs {
        bytes.extend_from_slice(&uv.x.to_le_bytes());
        bytes.extend_from_slice(&uv.y.to_le_bytes());
    }

    bytes
}

/// Write a hair asset to `path` in the binary `.tfx` format.
///
/// # Errors
///
/// Returns [`WriteError::Io`](crate::WriteError::Io) when the file
/// cannot be written.
pub fn write_tfx(path: &Path, asset: &HairAsset) -> WriteResult<()> {
    let bytes = encode_tfx(asset);
    write_atomic(path, &bytes)?;
    info!(
        path = %path.display(),
        strands = asset.num_hair_strands,
        vertices_per_strand = asset.num_vertices_per_strand,
        "wrote binary hair asset"
    );
    Ok(())
}
