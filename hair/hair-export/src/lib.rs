//! Hair export pipeline.
//!
//! Orchestrates the full path from an authoring-tool scene snapshot to
//! on-disk assets:
//!
//! 1. resample every raw strand to the configured vertex count,
//! 2. filter strands (minimum length, inside-mesh rejection, optional
//!    deterministic LOD shuffle),
//! 3. anchor each surviving strand root to the skin surface and project
//!    its UV,
//! 4. resolve bounded bone-weight bindings per anchor,
//! 5. serialize `.tfx` + `.tfxjson` (hair) or `.tfxmesh` (collision).
//!
//! The pipeline is all-or-nothing: every stage validates its
//! preconditions and the first categorized error aborts the export with
//! no partial output.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod anchor;
mod error;
mod filter;
mod pipeline;

pub use anchor::resolve_root_anchor;
pub use error::{ExportError, ExportResult, GeometryError};
pub use filter::{filter_strands, FilterOutcome, LOD_SHUFFLE_SEED};
pub use pipeline::{export_collision, export_hair, HairExportSummary};
