//! The export error taxonomy.
//!
//! Four categories surface to callers: configuration, insufficient
//! data, geometry, and skin binding, plus I/O failures from the
//! serializers. Stage-local error types convert into these via `From`,
//! so `?` carries the category through the pipeline.

use thiserror::Error;

use hair_io::WriteError;
use hair_resample::ResampleError;
use hair_skin::SkinBindingError;
use hair_types::{ConfigError, MeshError};

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Geometric failures: bad meshes, bad splines, unanchorable strands.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// A strand could not be resampled.
    #[error(transparent)]
    Resample(#[from] ResampleError),

    /// Every vertex of a strand classified as inside the skin mesh, so
    /// no ray direction for anchoring could be derived.
    #[error("strand {strand} lies entirely inside the skin mesh")]
    StrandInsideMesh {
        /// Index of the offending strand (post-filter order).
        strand: usize,
    },
}

/// Top-level export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid or incomplete configuration, detected before any work.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Too few strands for the simulation's thread-group size.
    #[error("insufficient strands: {got} (need at least {required})")]
    InsufficientData {
        /// Strands available.
        got: usize,
        /// Minimum required.
        required: usize,
    },

    /// A geometric failure.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A vertex or anchor with no qualifying bone weights.
    #[error(transparent)]
    SkinBinding(#[from] SkinBindingError),

    /// Serialization or file output failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<MeshError> for ExportError {
    fn from(err: MeshError) -> Self {
        Self::Geometry(err.into())
    }
}

impl From<ResampleError> for ExportError {
    fn from(err: ResampleError) -> Self {
        Self::Geometry(err.into())
    }
}
