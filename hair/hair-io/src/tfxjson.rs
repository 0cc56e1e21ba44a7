//! JSON `.tfxjson` hair format.

use std::path::Path;

use hair_types::HairAsset;
use tracing::info;

use crate::{write_atomic, WriteResult};

/// Encode a hair asset as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`WriteError::Json`](crate::WriteError::Json) when
/// serialization fails.
pub fn encode_tfxjson(asset: &HairAsset) -> WriteResult<String> {
    Ok(serde_json::to_string_pretty(asset)?)
}

/// Write a hair asset to `path` in the JSON `.tfxjson` format.
///
/// # Errors
///
/// Returns [`WriteError`](crate::WriteError) when serialization or the
/// file write fails.
pub fn write_tfxjson(path: &Path, asset: &HairAsset) -> WriteResult<()> {
    let json = encode_tfxjson(asset)?;
    write_atomic(path, json.as_bytes())?;
    info!(
        path = %path.display(),
        strands = asset.num_hair_strands,
        bones = asset.skin.bones_list.len(),
        "wrote JSON hair asset"
    );
    Ok(())
}
