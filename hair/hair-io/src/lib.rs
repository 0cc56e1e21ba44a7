//! Hair and collision asset serialization.
//!
//! Three on-disk formats, all consumed by existing engine loaders:
//!
//! - `.tfx` — the binary hair format: a fixed 160-byte little-endian
//!   header, a flat position block (4 `f32` per vertex) and a flat
//!   per-strand UV block (2 `f32`).
//! - `.tfxjson` — the JSON hair format with the skin-binding block
//!   embedded.
//! - `.tfxmesh` — the ASCII collision proxy format: bone table, skinned
//!   vertices and triangle list.
//!
//! Every writer has a pure `encode_*` function producing the complete
//! artifact in memory and a `write_*` function that persists it
//! atomically (temp file in the target directory, then rename). A failed
//! export never leaves a partial file at the target path.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod atomic;
mod error;
mod tfx;
mod tfxjson;
mod tfxmesh;

pub use atomic::write_atomic;
pub use error::{WriteError, WriteResult};
pub use tfx::{encode_tfx, write_tfx, TFX_HEADER_SIZE, TFX_VERSION};
pub use tfxjson::{encode_tfxjson, write_tfxjson};
pub use tfxmesh::{encode_tfxmesh, write_tfxmesh};
